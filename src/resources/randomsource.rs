//! Shared random number generator for movement strategies.
//!
//! Seed it to make random walks reproducible.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Debug, Clone)]
pub struct RandomSource {
    pub rng: Rng,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self { rng: Rng::new() }
    }
}

impl RandomSource {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }
}
