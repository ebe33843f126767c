//! Debug overlay toggle.
//!
//! While this resource is present the render pass draws the diagnostics
//! overlay (frame rate, scheduler ticks, simulation clock) and the world
//! view bounds. Remove it to hide them.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the diagnostics overlay is drawn.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode;
