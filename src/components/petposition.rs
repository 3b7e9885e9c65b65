use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Logical screen position of a pet. The current frame's anchor is aligned
/// with this point when drawing.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetPosition {
    pub x: i32,
    pub y: i32,
}

impl PetPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for PetPosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
