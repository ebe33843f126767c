//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per scheduler tick.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Record a tick of `dt` seconds on the `WorldTime` resource.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.elapsed += dt;
    wt.delta = dt;
    wt.frame_count += 1;
}
