//! Sprite index.
//!
//! Maps a sprite name (file stem) to the image file it was found at. The index
//! is built once by scanning a single directory and never rescanned; callers
//! that need fresh contents build a new one.

use std::path::{Path, PathBuf};

use log::{info, warn};
use rustc_hash::FxHashMap;

/// File extensions treated as sprite images.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "gif", "bmp", "jpg", "jpeg"];

/// Read-only sprite name to file path lookup.
#[derive(Debug, Clone, Default)]
pub struct SpriteIndex {
    sprites: FxHashMap<String, PathBuf>,
}

impl SpriteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `directory` (non-recursively) for image files.
    ///
    /// An absent or unreadable directory yields an empty index. When two files
    /// share a stem, the first in filename order wins.
    pub fn build(directory: impl AsRef<Path>) -> Self {
        let directory = directory.as_ref();
        let mut index = Self::new();

        let entries = match std::fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Sprite directory {:?} unavailable: {}", directory, e);
                return index;
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_image(p))
            .collect();
        files.sort();

        for path in files {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(existing) = index.sprites.get(stem) {
                warn!(
                    "Sprite '{}' already indexed at {:?}, ignoring {:?}",
                    stem, existing, path
                );
                continue;
            }
            index.sprites.insert(stem.to_string(), path);
        }

        info!("Indexed {} sprites in {:?}", index.sprites.len(), directory);
        index
    }

    /// Resolve a sprite reference such as `"shime1"` or `"shime1.png"`.
    ///
    /// Lookup is case-sensitive. A trailing image extension on `name` is
    /// ignored when the name itself is not indexed.
    pub fn resolve(&self, name: &str) -> Option<&Path> {
        if let Some(path) = self.sprites.get(name) {
            return Some(path);
        }
        let (stem, ext) = name.rsplit_once('.')?;
        if !IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            return None;
        }
        self.sprites.get(stem).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_directory_resolves_nothing() {
        let dir = tempdir().unwrap();
        let index = SpriteIndex::build(dir.path());
        assert!(index.is_empty());
        assert!(index.resolve("anything").is_none());
    }

    #[test]
    fn test_absent_directory_yields_empty_index() {
        let dir = tempdir().unwrap();
        let index = SpriteIndex::build(dir.path().join("no-such-dir"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_resolve_ignores_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("shime1.png"), b"").unwrap();
        let index = SpriteIndex::build(dir.path());

        let expected = dir.path().join("shime1.png");
        assert_eq!(index.resolve("shime1"), Some(expected.as_path()));
        assert_eq!(index.resolve("shime1.png"), Some(expected.as_path()));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("shime1.png"), b"").unwrap();
        let index = SpriteIndex::build(dir.path());

        assert!(index.resolve("Shime1").is_none());
        assert!(index.resolve("SHIME1.png").is_none());
    }

    #[test]
    fn test_non_images_and_subdirectories_are_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.png"), b"").unwrap();
        fs::write(dir.path().join("top.gif"), b"").unwrap();

        let index = SpriteIndex::build(dir.path());
        assert_eq!(index.len(), 1);
        assert!(index.resolve("top").is_some());
        assert!(index.resolve("deep").is_none());
        assert!(index.resolve("notes").is_none());
    }

    #[test]
    fn test_duplicate_stems_keep_first_in_filename_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();
        fs::write(dir.path().join("a.gif"), b"").unwrap();

        let index = SpriteIndex::build(dir.path());
        assert_eq!(index.len(), 1);
        assert_eq!(index.resolve("a"), Some(dir.path().join("a.gif").as_path()));
    }
}
