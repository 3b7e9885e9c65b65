//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta milliseconds on the `WorldTime` resource.
///
/// `dt_ms` is the unscaled tick delta. The scaled delta is rounded to whole
/// milliseconds; negative scales count as zero.
pub fn update_world_time(world: &mut World, dt_ms: u32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled = (f64::from(dt_ms) * f64::from(wt.time_scale)).round().max(0.0) as u32;
    wt.elapsed_ms += u64::from(scaled);
    wt.delta_ms = scaled;
    wt.tick_count += 1;
}
