//! Animation system.
//!
//! [`animation`] advances every pet's [`PlaybackState`] by the tick delta,
//! using the catalog of that pet's own visual type.
//!
//! # Animation Flow
//!
//! 1. Frame data is defined per visual type in an [`AssetPack`](crate::resources::assetlibrary::AssetPack)
//! 2. Pets carry a [`VisualType`] and a [`PlaybackState`] naming the active action
//! 3. `animation` adds [`WorldTime::delta_ms`] to each state, crossing as many
//!    frame boundaries as the delta covers
//!
//! Pets whose visual type has no loaded pack are skipped.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::animation::PlaybackState;
use crate::components::pet::{PetId, VisualType};
use crate::resources::assetlibrary::AssetLibrary;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback of all pets.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Looks up frame data from [`AssetLibrary`] by each pet's [`VisualType`].
/// - Mutates [`PlaybackState`] only.
pub fn animation(
    mut query: Query<(&PetId, &VisualType, &mut PlaybackState)>,
    library: Res<AssetLibrary>,
    time: Res<WorldTime>,
) {
    let dt = time.delta_ms;
    if dt == 0 {
        return;
    }

    for (id, visual_type, mut state) in query.iter_mut() {
        let Some(pack) = library.get(visual_type.as_str()) else {
            continue;
        };
        if state.advance(dt, &pack.catalog) {
            trace!(
                "{}: {} frame {}",
                id.0, state.action_name, state.frame_index
            );
        }
    }
}
