//! Linear velocity of a figure.
//!
//! The frame scheduler integrates [`RigidBody::velocity`] into the entity's
//! [`MapPosition`](super::mapposition::MapPosition) every tick, whether or
//! not the figure's limbs are animating. Motion controllers overwrite the
//! velocity with the vertical speed of their trajectory so the figure keeps
//! drifting the right way between controller updates.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Kinematic body storing a velocity in world units per second.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vector2,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
        }
    }

    /// Set the velocity of the RigidBody.
    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.velocity = Vector2 { x: vx, y: vy };
    }

    /// Get the current velocity.
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }
}
