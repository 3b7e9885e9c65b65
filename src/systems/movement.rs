//! Movement system.
//!
//! Moves walking pets with their [`Movement`] strategy, clamped to the
//! [`ScreenSize`]. Runs independently of animation timing.

use bevy_ecs::prelude::*;

use crate::components::behavior::Behavior;
use crate::components::movement::Movement;
use crate::components::petposition::PetPosition;
use crate::resources::randomsource::RandomSource;
use crate::resources::screensize::ScreenSize;

/// Apply one movement step to every walking pet.
pub fn movement(
    mut query: Query<(&Behavior, &Movement, &mut PetPosition)>,
    screen: Res<ScreenSize>,
    mut random: ResMut<RandomSource>,
) {
    for (behavior, mover, mut position) in query.iter_mut() {
        if let Some(next) = step(*behavior, mover, *position, &screen, &mut random) {
            *position = next;
        }
    }
}

/// Next position of one pet, or `None` if its behavior does not move it.
pub fn step(
    behavior: Behavior,
    mover: &Movement,
    position: PetPosition,
    screen: &ScreenSize,
    random: &mut RandomSource,
) -> Option<PetPosition> {
    if !behavior.is_moving() {
        return None;
    }
    Some(mover.strategy.next_position(position, screen, &mut random.rng))
}
