//! Simulation time resource.
//!
//! Holds the delta of the current tick in whole milliseconds, the value every
//! playback state is advanced by. Updated by
//! [`update_world_time`](crate::systems::time::update_world_time).

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Total scaled time since the engine started.
    pub elapsed_ms: u64,
    /// Scaled time of the current tick.
    pub delta_ms: u32,
    pub time_scale: f32,
    pub tick_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed_ms: 0,
            delta_ms: 0,
            time_scale: 1.0,
            tick_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
