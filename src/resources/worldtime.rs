//! Scheduler clock.
//!
//! [`WorldTime`] accumulates the nominal `dt` of every scheduler tick. It is
//! independent of the playback clock in
//! [`Playback`](crate::resources::playback::Playback), which can pause, run
//! backwards or be scrubbed; `WorldTime` only ever moves forward.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    /// Sum of all tick deltas, seconds.
    pub elapsed: f32,
    /// Delta of the last tick, seconds.
    pub delta: f32,
    /// Number of ticks so far.
    pub frame_count: u64,
}
