//! Per-pet animation playback state.
//!
//! A [`PlaybackState`] records which action a pet is playing, which frame of
//! that action is current, and how long that frame has been showing. Frame
//! data itself lives in the shared
//! [`AnimationCatalog`](crate::resources::animationcatalog::AnimationCatalog)
//! of the pet's visual type.
//!
//! # Invariants
//!
//! - `frame_index < frames.len()` whenever the action has frames.
//! - After [`advance`](PlaybackState::advance), `elapsed_ms` is strictly less
//!   than the current frame's duration. Time past a frame boundary carries
//!   into the next frame; a long tick may cross several frames or loops.
//! - Animations always loop.

use std::path::Path;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::resources::animationcatalog::{AnimationCatalog, FrameDescriptor};
use crate::resources::spriteindex::SpriteIndex;

#[derive(Debug, Clone, PartialEq, Eq, Component, Serialize, Deserialize)]
pub struct PlaybackState {
    pub action_name: String,
    pub frame_index: usize,
    pub elapsed_ms: u32,
}

impl PlaybackState {
    /// Start `action_name` at its first frame.
    pub fn new(action_name: impl Into<String>) -> Self {
        Self {
            action_name: action_name.into(),
            frame_index: 0,
            elapsed_ms: 0,
        }
    }

    /// Advance playback by `elapsed_ms` of wall-clock time.
    ///
    /// Returns `true` if the current frame changed. A no-op when the active
    /// action is missing from `catalog`.
    pub fn advance(&mut self, elapsed_ms: u32, catalog: &AnimationCatalog) -> bool {
        let Some(frames) = catalog.get_animation(&self.action_name) else {
            self.frame_index = 0;
            return false;
        };
        if frames.is_empty() {
            self.frame_index = 0;
            return false;
        }
        if self.frame_index >= frames.len() {
            self.frame_index = 0;
        }

        let mut changed = false;
        let mut elapsed = u64::from(self.elapsed_ms) + u64::from(elapsed_ms);

        // A whole loop from any frame comes back to the same frame.
        let cycle: u64 = frames.iter().map(|f| u64::from(f.duration_ms)).sum();
        if elapsed >= cycle {
            elapsed %= cycle;
            changed = true;
        }

        while elapsed >= u64::from(frames[self.frame_index].duration_ms) {
            changed = true;
            elapsed -= u64::from(frames[self.frame_index].duration_ms);
            self.frame_index += 1;
            if self.frame_index >= frames.len() {
                self.frame_index = 0;
            }
        }

        // elapsed < current duration, which fits in u32
        self.elapsed_ms = elapsed as u32;
        changed
    }

    /// Switch to `name`, restarting at its first frame.
    ///
    /// Unknown actions are rejected with [`EngineError::UnknownAction`] and the
    /// state is left untouched. Selecting the current action is a no-op.
    pub fn set_action(&mut self, name: &str, catalog: &AnimationCatalog) -> Result<(), EngineError> {
        if !catalog.contains(name) {
            return Err(EngineError::UnknownAction(name.to_string()));
        }
        if self.action_name != name {
            self.action_name = name.to_string();
            self.frame_index = 0;
            self.elapsed_ms = 0;
        }
        Ok(())
    }

    /// Frame to draw right now, if the active action has one.
    pub fn current_frame<'a>(&self, catalog: &'a AnimationCatalog) -> Option<&'a FrameDescriptor> {
        catalog
            .get_animation(&self.action_name)?
            .get(self.frame_index)
    }

    /// Image file of the current frame, or `None` when there is nothing to draw.
    pub fn current_sprite<'a>(
        &self,
        catalog: &AnimationCatalog,
        sprites: &'a SpriteIndex,
    ) -> Option<&'a Path> {
        let frame = self.current_frame(catalog)?;
        sprites.resolve(&frame.image_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(image: &str, duration_ms: u32) -> String {
        format!(r#"<Pose Image="/{image}" Duration="{duration_ms}"/>"#)
    }

    fn catalog(actions: &[(&str, &[(&str, u32)])]) -> AnimationCatalog {
        let mut body = String::new();
        for (name, poses) in actions {
            body.push_str(&format!(r#"<Action Name="{name}"><Animation>"#));
            for (image, duration) in poses.iter() {
                body.push_str(&pose(image, *duration));
            }
            body.push_str("</Animation></Action>");
        }
        AnimationCatalog::parse(&format!(
            r#"<Mascot xmlns="http://www.group-finity.com/Mascot">{body}</Mascot>"#
        ))
        .unwrap()
    }

    fn three_by_hundred() -> AnimationCatalog {
        catalog(&[
            ("Walk", &[("a.png", 100), ("b.png", 100), ("c.png", 100)]),
            ("Stand", &[("s.png", 250)]),
        ])
    }

    #[test]
    fn test_advance_below_duration_stays_on_frame() {
        let catalog = three_by_hundred();
        let mut state = PlaybackState::new("Walk");
        assert!(!state.advance(99, &catalog));
        assert_eq!((state.frame_index, state.elapsed_ms), (0, 99));
    }

    #[test]
    fn test_advance_carries_remainder() {
        let catalog = three_by_hundred();
        let mut state = PlaybackState::new("Walk");
        state.advance(60, &catalog);
        assert!(state.advance(60, &catalog));
        assert_eq!((state.frame_index, state.elapsed_ms), (1, 20));
    }

    #[test]
    fn test_single_tick_skips_multiple_frames() {
        let catalog = three_by_hundred();
        let mut state = PlaybackState::new("Walk");
        state.advance(250, &catalog);
        assert_eq!((state.frame_index, state.elapsed_ms), (2, 50));
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let catalog = catalog(&[("Sit", &[("a.png", 30), ("b.png", 70), ("c.png", 120), ("d.png", 5)])]);
        let mut state = PlaybackState::new("Sit");

        // in one tick
        state.advance(225, &catalog);
        assert_eq!((state.frame_index, state.elapsed_ms), (0, 0));

        // in uneven ticks
        for step in [1, 29, 50, 20, 100, 25] {
            state.advance(step, &catalog);
        }
        assert_eq!((state.frame_index, state.elapsed_ms), (0, 0));
    }

    #[test]
    fn test_carry_landing_on_full_cycle_reports_change() {
        let catalog = catalog(&[("Walk", &[("a.png", 100), ("b.png", 100)])]);
        let mut state = PlaybackState::new("Walk");
        assert!(state.advance(150, &catalog));
        assert!(state.advance(150, &catalog));
        assert_eq!((state.frame_index, state.elapsed_ms), (1, 0));
    }

    #[test]
    fn test_tick_longer_than_several_loops() {
        let catalog = three_by_hundred();
        let mut state = PlaybackState::new("Walk");
        state.advance(150, &catalog);
        state.advance(3 * 300 + 120, &catalog);
        assert_eq!((state.frame_index, state.elapsed_ms), (2, 70));
    }

    #[test]
    fn test_uneven_durations_arithmetic() {
        let catalog = catalog(&[("Stand", &[("a.png", 200), ("b.png", 300)])]);
        let mut state = PlaybackState::new("Stand");
        state.advance(450, &catalog);
        assert_eq!((state.frame_index, state.elapsed_ms), (1, 250));

        state.advance(50, &catalog);
        assert_eq!((state.frame_index, state.elapsed_ms), (0, 0));
    }

    #[test]
    fn test_advance_with_unknown_action_is_noop() {
        let catalog = three_by_hundred();
        let mut state = PlaybackState::new("Fly");
        assert!(!state.advance(1000, &catalog));
        assert_eq!((state.frame_index, state.elapsed_ms), (0, 0));
        assert!(state.current_frame(&catalog).is_none());
    }

    #[test]
    fn test_advance_on_empty_catalog_is_noop() {
        let catalog = AnimationCatalog::new();
        let mut state = PlaybackState::new("Stand");
        state.advance(500, &catalog);
        assert_eq!(state, PlaybackState::new("Stand"));
    }

    #[test]
    fn test_set_action_resets_position() {
        let catalog = three_by_hundred();
        let mut state = PlaybackState::new("Walk");
        state.advance(170, &catalog);
        assert_eq!((state.frame_index, state.elapsed_ms), (1, 70));

        state.set_action("Stand", &catalog).unwrap();
        assert_eq!(state, PlaybackState::new("Stand"));
    }

    #[test]
    fn test_set_same_action_keeps_position() {
        let catalog = three_by_hundred();
        let mut state = PlaybackState::new("Walk");
        state.advance(170, &catalog);
        state.set_action("Walk", &catalog).unwrap();
        assert_eq!((state.frame_index, state.elapsed_ms), (1, 70));
    }

    #[test]
    fn test_unknown_action_is_rejected_without_changes() {
        let catalog = three_by_hundred();
        let mut state = PlaybackState::new("Walk");
        state.advance(230, &catalog);
        let before = state.clone();

        let err = state.set_action("Fly", &catalog).unwrap_err();
        assert!(matches!(err, EngineError::UnknownAction(ref name) if name == "Fly"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_current_frame_follows_index() {
        let catalog = three_by_hundred();
        let mut state = PlaybackState::new("Walk");
        state.advance(100, &catalog);
        assert_eq!(state.current_frame(&catalog).unwrap().image_ref, "b.png");
    }

    #[test]
    fn test_current_sprite_none_when_unresolved() {
        let catalog = three_by_hundred();
        let sprites = SpriteIndex::new();
        let state = PlaybackState::new("Walk");
        assert!(state.current_frame(&catalog).is_some());
        assert!(state.current_sprite(&catalog, &sprites).is_none());
    }
}
