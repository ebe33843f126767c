//! Screen size resource.
//!
//! Stores the current window dimensions in pixels. The world view is refitted
//! and the control panel laid out again whenever it changes.

use bevy_ecs::prelude::Resource;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
