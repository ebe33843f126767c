use bevy_ecs::prelude::Component;

/// Uniform size factor from figure-local units to world units.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Scale {
    pub factor: f32,
}
impl Scale {
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }
}
impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0)
    }
}
