//! World-space position component.
//!
//! The [`MapPosition`] component stores where a figure sits in world units
//! (metres along the ground for `x`, metres above it for `y`). The figure
//! renderer uses it as the origin of the figure's local frame.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// World-space position (pivot) for an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    /// 2D coordinates in world units, `y` pointing up.
    pub pos: Vector2,
}

impl Default for MapPosition {
    fn default() -> Self {
        Self {
            pos: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}

impl MapPosition {
    /// Create a MapPosition from x and y.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    /// Set the entire position.
    pub fn set_pos(&mut self, pos: Vector2) {
        self.pos = pos;
    }

    /// Move by `velocity * dt`.
    pub fn translate(&mut self, velocity: Vector2, dt: f32) {
        self.pos += velocity.scale_by(dt);
    }
}
