use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

/// Text overlay that follows a motion controller.
///
/// The entity owns its own canvas layer; the controller rewrites it when
/// asked to update its label.
#[derive(Component, Clone, Debug)]
pub struct Label {
    /// Font size in screen pixels.
    pub font_size: f32,
    pub color: Color,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            color: Color::BLACK,
        }
    }
}

/// Marker for the startup key hint, hidden by a one-shot timer.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Hint;
