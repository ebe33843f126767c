use bevy_ecs::prelude::Component;

/// Figure heading in degrees, counter-clockwise from the +x axis.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
}
