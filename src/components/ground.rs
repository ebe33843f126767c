use bevy_ecs::prelude::Component;

/// Owner of the ground line's canvas layer, at world height `y`.
#[derive(Component, Clone, Copy, Debug)]
pub struct Ground {
    pub y: f32,
}
