//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame and
//!   writes the results into [`InputState`].
//! - [`apply_playback_controls`] turns that state into playback events:
//!   keyboard shortcuts plus pointer interaction with the [`ControlPanel`].
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::events::playback::{RateChangeEvent, ScrubEvent, TogglePauseEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::controls::{ControlAction, ControlPanel};
use crate::resources::input::InputState;
use crate::resources::playback::{Playback, RATE_STEP, SCRUB_STEP};

/// Poll Raylib for keyboard and mouse input and update the `InputState` resource.
pub fn update_input_state(mut input: ResMut<InputState>, rl: NonSend<RaylibHandle>) {
    for key in input.keys_mut() {
        key.active = rl.is_key_down(key.key_binding);
        key.just_pressed = rl.is_key_pressed(key.key_binding);
    }
    input.mouse.position = rl.get_mouse_position();
    input.mouse.pressed = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
    input.mouse.down = rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT);
}

/// Translate this frame's input into playback events.
pub fn apply_playback_controls(
    input: Res<InputState>,
    playback: Res<Playback>,
    mut panel: ResMut<ControlPanel>,
    mut commands: Commands,
) {
    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent);
    }
    if input.toggle_pause.just_pressed {
        commands.trigger(TogglePauseEvent);
    }
    if input.scrub_back.just_pressed {
        commands.trigger(ScrubEvent {
            time: playback.simulation_time - SCRUB_STEP,
        });
    }
    if input.scrub_forward.just_pressed {
        commands.trigger(ScrubEvent {
            time: playback.simulation_time + SCRUB_STEP,
        });
    }
    if input.rate_up.just_pressed {
        commands.trigger(RateChangeEvent {
            rate: playback.rate + RATE_STEP,
        });
    }
    if input.rate_down.just_pressed {
        commands.trigger(RateChangeEvent {
            rate: playback.rate - RATE_STEP,
        });
    }

    let mouse = input.mouse;
    for action in panel.pointer(mouse.position, mouse.pressed, mouse.down) {
        match action {
            ControlAction::TogglePause => commands.trigger(TogglePauseEvent),
            ControlAction::Scrub(time) => commands.trigger(ScrubEvent { time }),
            ControlAction::SetRate(rate) => commands.trigger(RateChangeEvent { rate }),
        }
    }
}
