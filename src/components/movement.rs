//! Pluggable movement strategies.
//!
//! Movement only ever changes a pet's [`PetPosition`]; it never touches
//! animation timing. The [`movement`](crate::systems::movement::movement)
//! system applies a pet's strategy once per tick while the pet is walking.

use bevy_ecs::prelude::Component;
use fastrand::Rng;

use crate::components::petposition::PetPosition;
use crate::resources::screensize::ScreenSize;

/// Computes the next position of a moving pet.
pub trait MovementStrategy: Send + Sync + 'static {
    /// Next position from `position`. Implementations keep the result inside `bounds`.
    fn next_position(&self, position: PetPosition, bounds: &ScreenSize, rng: &mut Rng)
    -> PetPosition;
}

/// Bounded random walk: each axis moves by a uniform step in
/// `[-max_step, max_step]`, then the position is clamped to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomWalk {
    pub max_step: i32,
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self { max_step: 10 }
    }
}

impl MovementStrategy for RandomWalk {
    fn next_position(
        &self,
        position: PetPosition,
        bounds: &ScreenSize,
        rng: &mut Rng,
    ) -> PetPosition {
        let step = self.max_step.saturating_abs();
        let moved = PetPosition {
            x: position.x.saturating_add(rng.i32(-step..=step)),
            y: position.y.saturating_add(rng.i32(-step..=step)),
        };
        bounds.clamp(moved)
    }
}

/// Movement strategy attached to a pet.
#[derive(Component)]
pub struct Movement {
    pub strategy: Box<dyn MovementStrategy>,
}

impl Movement {
    pub fn new(strategy: impl MovementStrategy) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(RandomWalk::default())
    }
}
