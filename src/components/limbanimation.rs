//! Walking-cycle phase of a figure.
//!
//! [`LimbAnimation`] holds the phase angle that drives the sinusoidal limb
//! and tail offsets in the figure renderer. The frame scheduler advances the
//! phase by `2π · speed · dt` each tick while `animating` is set. Stopping
//! an animation freezes the phase where it is; the figure keeps moving and
//! being redrawn.

use std::f32::consts::TAU;

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct LimbAnimation {
    /// Current phase in radians. Unbounded; only its sine/cosine are used.
    pub phase: f32,
    /// Walking cycles per second.
    pub speed: f32,
    /// Whether the scheduler advances `phase`.
    pub animating: bool,
}

impl LimbAnimation {
    /// Start cycling at `cycles_per_second`.
    pub fn start(&mut self, cycles_per_second: f32) {
        self.speed = cycles_per_second;
        self.animating = true;
    }

    pub fn stop(&mut self) {
        self.animating = false;
    }

    /// Advance the phase by one frame of `dt` seconds, if animating.
    pub fn advance(&mut self, dt: f32) {
        if self.animating {
            self.phase += TAU * self.speed * dt;
        }
    }
}
