//! Per-frame input resource.
//!
//! Captures the keys and mouse state the playback controls care about and
//! exposes them to systems via the [`InputState`] resource. Keeping the
//! raw state in a resource lets the control logic run without a window.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding,
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to(KeyboardKey::KEY_NULL)
    }
}

/// Left mouse button and pointer position, in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct MouseState {
    pub position: Vector2,
    pub pressed: bool,
    pub down: bool,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            position: Vector2 { x: 0.0, y: 0.0 },
            pressed: false,
            down: false,
        }
    }
}

/// Resource capturing the per-frame input relevant to playback.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub toggle_pause: BoolState,
    pub scrub_back: BoolState,
    pub scrub_forward: BoolState,
    pub rate_up: BoolState,
    pub rate_down: BoolState,
    pub mode_debug: BoolState,
    pub mouse: MouseState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            toggle_pause: BoolState::bound_to(KeyboardKey::KEY_SPACE),
            scrub_back: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            scrub_forward: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            rate_up: BoolState::bound_to(KeyboardKey::KEY_UP),
            rate_down: BoolState::bound_to(KeyboardKey::KEY_DOWN),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
            mouse: MouseState::default(),
        }
    }
}

impl InputState {
    /// Every key binding, for polling.
    pub fn keys_mut(&mut self) -> [&mut BoolState; 6] {
        [
            &mut self.toggle_pause,
            &mut self.scrub_back,
            &mut self.scrub_forward,
            &mut self.rate_up,
            &mut self.rate_down,
            &mut self.mode_debug,
        ]
    }
}
