//! Animation catalog.
//!
//! Immutable registry of named actions, each an ordered, non-empty list of
//! [`FrameDescriptor`]s, parsed from a Shimeji-style `actions.xml` document.
//! A catalog is shared read-only by every pet of the same visual type; the
//! per-pet playback position lives in
//! [`PlaybackState`](crate::components::animation::PlaybackState).
//!
//! # Document Format
//!
//! ```xml
//! <Mascot xmlns="http://www.group-finity.com/Mascot">
//!   <ActionList>
//!     <Action Name="Stand" Type="Stay">
//!       <Animation>
//!         <Pose Image="/shime1.png" ImageAnchor="64,128" Velocity="0,0" Duration="250" />
//!       </Animation>
//!     </Action>
//!   </ActionList>
//! </Mascot>
//! ```
//!
//! Every `Animation` below an `Action` is appended to that action's frame
//! list in declaration order; variants are never chosen between.

use std::path::Path;

use log::{debug, info};
use roxmltree::{Document, Node};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::ParseError;

/// XML namespace of the Shimeji mascot schema.
pub const MASCOT_NAMESPACE: &str = "http://www.group-finity.com/Mascot";

/// Action used as the playback default when a catalog declares it.
pub const DEFAULT_ACTION: &str = "Stand";

const DEFAULT_ANCHOR: (i32, i32) = (64, 128);
const DEFAULT_VELOCITY: (f32, f32) = (0.0, 0.0);
const DEFAULT_DURATION_MS: u32 = 250;

/// One pose of an action: which image to show, where to pin it, and for how long.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameDescriptor {
    /// Sprite name as referenced by the document, without leading slash.
    pub image_ref: String,
    /// Pixel offset inside the image aligned with the pet's logical position.
    pub anchor: (i32, i32),
    /// Per-frame displacement hint.
    pub velocity: (f32, f32),
    /// Time this frame stays current. Always greater than zero.
    pub duration_ms: u32,
}

/// A named, non-empty frame sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: String,
    pub frames: Vec<FrameDescriptor>,
}

/// Action name to frame sequence mapping, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct AnimationCatalog {
    actions: Vec<Action>,
    by_name: FxHashMap<String, usize>,
}

impl AnimationCatalog {
    /// Create an empty catalog ("no animations available").
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a description file.
    ///
    /// A missing file yields an empty catalog. Any other read failure or a
    /// malformed document is returned as a [`ParseError`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No animation description at {:?}, using empty catalog", path);
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let catalog = Self::parse(&text)?;
        info!(
            "Loaded {} actions from {:?}",
            catalog.actions.len(),
            path
        );
        Ok(catalog)
    }

    /// Parse a catalog from the text of a description document.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let doc = Document::parse(text.trim_start())?;
        let mut catalog = Self::new();

        for action in doc
            .root_element()
            .descendants()
            .skip(1)
            .filter(|n| n.has_tag_name((MASCOT_NAMESPACE, "Action")))
        {
            let Some(name) = action.attribute("Name") else {
                continue;
            };

            let mut frames = Vec::new();
            for animation in action
                .descendants()
                .skip(1)
                .filter(|n| n.has_tag_name((MASCOT_NAMESPACE, "Animation")))
            {
                for pose in animation
                    .descendants()
                    .skip(1)
                    .filter(|n| n.has_tag_name((MASCOT_NAMESPACE, "Pose")))
                {
                    frames.push(parse_pose(name, pose)?);
                }
            }

            if frames.is_empty() {
                debug!("Dropping action '{}' with no poses", name);
                continue;
            }
            catalog.insert(name, frames);
        }

        Ok(catalog)
    }

    /// Insert or replace an action. A replaced action keeps its list position.
    fn insert(&mut self, name: &str, frames: Vec<FrameDescriptor>) {
        match self.by_name.get(name) {
            Some(&idx) => self.actions[idx].frames = frames,
            None => {
                self.by_name.insert(name.to_string(), self.actions.len());
                self.actions.push(Action {
                    name: name.to_string(),
                    frames,
                });
            }
        }
    }

    /// Frame sequence of `name`, or `None` when the action is not in the catalog.
    pub fn get_animation(&self, name: &str) -> Option<&[FrameDescriptor]> {
        self.by_name
            .get(name)
            .map(|&idx| self.actions[idx].frames.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Action names in declaration order.
    pub fn list_actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.name.as_str())
    }

    /// Action a freshly spawned pet starts with: "Stand" when declared,
    /// otherwise the first declared action.
    pub fn default_action(&self) -> Option<&str> {
        if self.contains(DEFAULT_ACTION) {
            return Some(DEFAULT_ACTION);
        }
        self.actions.first().map(|a| a.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn parse_pose(action: &str, pose: Node) -> Result<FrameDescriptor, ParseError> {
    let image_ref = pose
        .attribute("Image")
        .unwrap_or("")
        .trim_start_matches('/')
        .to_string();

    let anchor = match pose.attribute("ImageAnchor") {
        Some(value) => parse_point(value).ok_or_else(|| ParseError::InvalidPoint {
            action: action.to_string(),
            attribute: "ImageAnchor",
            value: value.to_string(),
        })?,
        None => DEFAULT_ANCHOR,
    };

    let velocity = match pose.attribute("Velocity") {
        Some(value) => parse_point(value).ok_or_else(|| ParseError::InvalidPoint {
            action: action.to_string(),
            attribute: "Velocity",
            value: value.to_string(),
        })?,
        None => DEFAULT_VELOCITY,
    };

    let duration_ms = match pose.attribute("Duration") {
        Some(value) => parse_duration(value).ok_or_else(|| ParseError::InvalidDuration {
            action: action.to_string(),
            value: value.to_string(),
        })?,
        None => DEFAULT_DURATION_MS,
    };

    Ok(FrameDescriptor {
        image_ref,
        anchor,
        velocity,
        duration_ms,
    })
}

/// Parse an "x,y" pair.
fn parse_point<T: std::str::FromStr>(value: &str) -> Option<(T, T)> {
    let (x, y) = value.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Zero, negative and non-integer durations are rejected.
fn parse_duration(value: &str) -> Option<u32> {
    let ms: i64 = value.trim().parse().ok()?;
    if ms <= 0 {
        return None;
    }
    u32::try_from(ms).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(actions: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Mascot xmlns="http://www.group-finity.com/Mascot">
  <ActionList>
{actions}
  </ActionList>
</Mascot>"#
        )
    }

    #[test]
    fn test_missing_attributes_use_defaults() {
        let catalog = AnimationCatalog::parse(&doc(
            r#"<Action Name="Walk" Type="Move">
                 <Animation>
                   <Pose Image="/shime1.png" />
                   <Pose Image="/shime2.png" Velocity="-2,0" />
                 </Animation>
               </Action>"#,
        ))
        .unwrap();

        let frames = catalog.get_animation("Walk").unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].duration_ms, 250);
        assert_eq!(frames[0].anchor, (64, 128));
        assert_eq!(frames[0].velocity, (0.0, 0.0));
        assert_eq!(frames[1].velocity, (-2.0, 0.0));
    }

    #[test]
    fn test_leading_slash_is_stripped() {
        let catalog = AnimationCatalog::parse(&doc(
            r#"<Action Name="Stand"><Animation><Pose Image="/shime1.png" Duration="100"/></Animation></Action>"#,
        ))
        .unwrap();
        assert_eq!(catalog.get_animation("Stand").unwrap()[0].image_ref, "shime1.png");
    }

    #[test]
    fn test_animation_variants_are_concatenated() {
        let catalog = AnimationCatalog::parse(&doc(
            r#"<Action Name="Sit">
                 <Animation><Pose Image="/a.png" Duration="10"/><Pose Image="/b.png" Duration="20"/></Animation>
                 <Animation Condition="true"><Pose Image="/c.png" Duration="30"/></Animation>
               </Action>"#,
        ))
        .unwrap();

        let images: Vec<&str> = catalog
            .get_animation("Sit")
            .unwrap()
            .iter()
            .map(|f| f.image_ref.as_str())
            .collect();
        assert_eq!(images, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_actions_without_poses_are_dropped() {
        let catalog = AnimationCatalog::parse(&doc(
            r#"<Action Name="Fall" Type="Embedded" Class="com.group_finity.mascot.action.Fall" />
               <Action Name="Stand"><Animation><Pose Image="/shime1.png"/></Animation></Action>"#,
        ))
        .unwrap();

        assert!(catalog.get_animation("Fall").is_none());
        assert!(!catalog.contains("Fall"));
        assert_eq!(catalog.list_actions().collect::<Vec<_>>(), vec!["Stand"]);
    }

    #[test]
    fn test_list_actions_keeps_declaration_order() {
        let catalog = AnimationCatalog::parse(&doc(
            r#"<Action Name="Walk"><Animation><Pose Image="/w.png"/></Animation></Action>
               <Action Name="Stand"><Animation><Pose Image="/s.png"/></Animation></Action>
               <Action Name="Sit"><Animation><Pose Image="/t.png"/></Animation></Action>"#,
        ))
        .unwrap();

        assert_eq!(
            catalog.list_actions().collect::<Vec<_>>(),
            vec!["Walk", "Stand", "Sit"]
        );
    }

    #[test]
    fn test_duplicate_action_replaces_frames_in_place() {
        let catalog = AnimationCatalog::parse(&doc(
            r#"<Action Name="Stand"><Animation><Pose Image="/old.png"/></Animation></Action>
               <Action Name="Walk"><Animation><Pose Image="/w.png"/></Animation></Action>
               <Action Name="Stand"><Animation><Pose Image="/new.png"/></Animation></Action>"#,
        ))
        .unwrap();

        assert_eq!(
            catalog.list_actions().collect::<Vec<_>>(),
            vec!["Stand", "Walk"]
        );
        assert_eq!(catalog.get_animation("Stand").unwrap()[0].image_ref, "new.png");
    }

    #[test]
    fn test_elements_outside_namespace_are_ignored() {
        let text = r#"<Mascot>
            <Action Name="Stand"><Animation><Pose Image="/s.png"/></Animation></Action>
        </Mascot>"#;
        let catalog = AnimationCatalog::parse(text).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_non_integer_duration_is_fatal() {
        let err = AnimationCatalog::parse(&doc(
            r#"<Action Name="Stand"><Animation><Pose Image="/s.png" Duration="fast"/></Animation></Action>"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidDuration { ref value, .. } if value == "fast"));
    }

    #[test]
    fn test_zero_and_negative_durations_are_fatal() {
        for bad in ["0", "-5"] {
            let text = doc(&format!(
                r#"<Action Name="Stand"><Animation><Pose Image="/s.png" Duration="{bad}"/></Animation></Action>"#
            ));
            assert!(matches!(
                AnimationCatalog::parse(&text),
                Err(ParseError::InvalidDuration { .. })
            ));
        }
    }

    #[test]
    fn test_malformed_anchor_is_fatal() {
        let err = AnimationCatalog::parse(&doc(
            r#"<Action Name="Stand"><Animation><Pose Image="/s.png" ImageAnchor="64"/></Animation></Action>"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidPoint {
                attribute: "ImageAnchor",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_xml_is_fatal() {
        let err = AnimationCatalog::parse("<Mascot><Action Name=\"Stand\">").unwrap_err();
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn test_default_action_prefers_stand() {
        let catalog = AnimationCatalog::parse(&doc(
            r#"<Action Name="Walk"><Animation><Pose Image="/w.png"/></Animation></Action>
               <Action Name="Stand"><Animation><Pose Image="/s.png"/></Animation></Action>"#,
        ))
        .unwrap();
        assert_eq!(catalog.default_action(), Some("Stand"));

        let catalog = AnimationCatalog::parse(&doc(
            r#"<Action Name="Walk"><Animation><Pose Image="/w.png"/></Animation></Action>"#,
        ))
        .unwrap();
        assert_eq!(catalog.default_action(), Some("Walk"));

        assert_eq!(AnimationCatalog::new().default_action(), None);
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AnimationCatalog::load(dir.path().join("actions.xml")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.xml");
        std::fs::write(
            &path,
            doc(r#"<Action Name="Stand"><Animation><Pose Image="/s.png"/></Animation></Action>"#),
        )
        .unwrap();

        let catalog = AnimationCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
