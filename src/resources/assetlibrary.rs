//! Asset packs and the library that owns them.
//!
//! A visual type (e.g. `"Patamon Shimeji"`) names one asset pack on disk:
//!
//! ```text
//! <assets_root>/<visual type>/
//!     img/<character>/*.png   (or img/*.png when there is no character folder)
//!     conf/actions.xml
//! ```
//!
//! `<character>` is the first word of the visual type. Packs are loaded the
//! first time a visual type is requested and then shared, read-only, by every
//! pet of that type.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;

use crate::error::ParseError;
use crate::resources::animationcatalog::AnimationCatalog;
use crate::resources::spriteindex::SpriteIndex;

const IMAGES_DIR: &str = "img";
const CONF_DIR: &str = "conf";
const ACTIONS_FILE: &str = "actions.xml";

/// Catalog and sprite index of one visual type.
#[derive(Debug, Default)]
pub struct AssetPack {
    pub name: String,
    pub catalog: AnimationCatalog,
    pub sprites: SpriteIndex,
}

impl AssetPack {
    /// Load the pack for `visual_type` below `assets_root`.
    ///
    /// Missing directories or files produce an empty catalog/index. Only a
    /// malformed `actions.xml` fails.
    pub fn load(assets_root: &Path, visual_type: &str) -> Result<Self, ParseError> {
        let pack_root = assets_root.join(visual_type);
        let catalog = AnimationCatalog::load(pack_root.join(CONF_DIR).join(ACTIONS_FILE))?;
        let sprites = SpriteIndex::build(images_dir(&pack_root, visual_type));
        info!(
            "Asset pack '{}': {} actions, {} sprites",
            visual_type,
            catalog.len(),
            sprites.len()
        );
        Ok(Self {
            name: visual_type.to_string(),
            catalog,
            sprites,
        })
    }

    /// Build a pack from already constructed parts.
    pub fn from_parts(
        name: impl Into<String>,
        catalog: AnimationCatalog,
        sprites: SpriteIndex,
    ) -> Self {
        Self {
            name: name.into(),
            catalog,
            sprites,
        }
    }
}

/// `img/<first word>` when present, `img` otherwise.
fn images_dir(pack_root: &Path, visual_type: &str) -> PathBuf {
    let images = pack_root.join(IMAGES_DIR);
    if let Some(character) = visual_type.split_whitespace().next() {
        let character_dir = images.join(character);
        if character_dir.is_dir() {
            return character_dir;
        }
    }
    images
}

/// All asset packs loaded so far, keyed by visual type.
#[derive(Resource, Debug)]
pub struct AssetLibrary {
    root: PathBuf,
    packs: FxHashMap<String, Arc<AssetPack>>,
}

impl AssetLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            packs: FxHashMap::default(),
        }
    }

    /// Return the pack for `visual_type`, loading it on first request.
    ///
    /// A failed load is not cached; the next request retries.
    pub fn load(&mut self, visual_type: &str) -> Result<Arc<AssetPack>, ParseError> {
        if let Some(pack) = self.packs.get(visual_type) {
            return Ok(Arc::clone(pack));
        }
        let pack = Arc::new(AssetPack::load(&self.root, visual_type)?);
        self.packs.insert(visual_type.to_string(), Arc::clone(&pack));
        Ok(pack)
    }

    /// Register a pack built elsewhere, replacing any pack of the same name.
    pub fn insert(&mut self, pack: AssetPack) -> Arc<AssetPack> {
        let pack = Arc::new(pack);
        self.packs.insert(pack.name.clone(), Arc::clone(&pack));
        pack
    }

    /// Already loaded pack, without touching the filesystem.
    pub fn get(&self, visual_type: &str) -> Option<&Arc<AssetPack>> {
        self.packs.get(visual_type)
    }
}
