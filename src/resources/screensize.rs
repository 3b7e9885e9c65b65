//! Screen size resource.
//!
//! Stores the dimensions of the surface pets are drawn on. Movement clamps
//! positions to `[0, w] x [0, h]`.

use bevy_ecs::prelude::Resource;

use crate::components::petposition::PetPosition;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    /// Clamp `position` to the screen bounds, edges included.
    pub fn clamp(&self, position: PetPosition) -> PetPosition {
        PetPosition {
            x: position.x.clamp(0, self.w.max(0)),
            y: position.y.clamp(0, self.h.max(0)),
        }
    }
}
