//! World coordinate system of the view.
//!
//! [`WorldView`] is the rectangle of world space that is mapped onto the
//! window. It is fitted so that a vertical range of interest is fully
//! visible and the horizontal range follows the window aspect ratio, so
//! figures are never stretched. World `y` points up; screen `y` points down.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

/// Aspect ratio assumed when the window reports a zero height.
const FALLBACK_ASPECT: f32 = 4.0 / 3.0;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WorldView {
    pub x_lo: f32,
    pub y_lo: f32,
    pub x_hi: f32,
    pub y_hi: f32,
}

impl Default for WorldView {
    fn default() -> Self {
        Self::fit_to_height(900, 600, 0.0, 80.0, 0.0, 0.15)
    }
}

impl WorldView {
    /// Fit the view to show `[y_min, y_max]` plus a margin of `margin_frac`
    /// of the range above and below, centred horizontally on `x_center`.
    pub fn fit_to_height(
        window_w: i32,
        window_h: i32,
        y_min: f32,
        y_max: f32,
        x_center: f32,
        margin_frac: f32,
    ) -> Self {
        let aspect = if window_h > 0 {
            window_w as f32 / window_h as f32
        } else {
            FALLBACK_ASPECT
        };

        let y_range = (y_max - y_min) * (1.0 + 2.0 * margin_frac);
        let y_mid = 0.5 * (y_min + y_max);
        let x_range = y_range * aspect;

        Self {
            x_lo: x_center - 0.5 * x_range,
            y_lo: y_mid - 0.5 * y_range,
            x_hi: x_center + 0.5 * x_range,
            y_hi: y_mid + 0.5 * y_range,
        }
    }

    pub fn width(&self) -> f32 {
        self.x_hi - self.x_lo
    }

    pub fn height(&self) -> f32 {
        self.y_hi - self.y_lo
    }

    /// Pixels per world unit for a screen of the given height.
    pub fn pixels_per_unit(&self, screen_h: i32) -> f32 {
        let h = self.height();
        if h > 0.0 { screen_h as f32 / h } else { 1.0 }
    }

    /// Map a world point to screen pixels.
    pub fn world_to_screen(&self, p: Vector2, screen_w: i32, screen_h: i32) -> Vector2 {
        let w = self.width();
        let h = self.height();
        if w <= 0.0 || h <= 0.0 {
            return Vector2 { x: 0.0, y: 0.0 };
        }
        Vector2 {
            x: (p.x - self.x_lo) / w * screen_w as f32,
            y: (self.y_hi - p.y) / h * screen_h as f32,
        }
    }

    /// Map screen pixels back to world space.
    pub fn screen_to_world(&self, p: Vector2, screen_w: i32, screen_h: i32) -> Vector2 {
        if screen_w <= 0 || screen_h <= 0 {
            return Vector2 {
                x: self.x_lo,
                y: self.y_hi,
            };
        }
        Vector2 {
            x: self.x_lo + p.x / screen_w as f32 * self.width(),
            y: self.y_hi - p.y / screen_h as f32 * self.height(),
        }
    }
}
