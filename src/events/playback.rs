//! Playback control events.
//!
//! The control panel and the keyboard never touch [`Playback`] directly;
//! they trigger these events and the observers below apply them.
//!
//! - [`TogglePauseEvent`] flips the pause flag and the button label.
//! - [`RateChangeEvent`] sets the playback rate (clamped to `[-3, 3]`).
//! - [`ScrubEvent`] jumps the simulation to a time and redraws both bodies
//!   immediately, even while paused.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::controls::ControlPanel;
use crate::resources::playback::Playback;
use crate::systems::playback::{SimulationContext, update_simulation};

#[derive(Event, Debug, Clone, Copy)]
pub struct TogglePauseEvent;

#[derive(Event, Debug, Clone, Copy)]
pub struct RateChangeEvent {
    pub rate: f32,
}

/// Jump to simulation time `time` seconds.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScrubEvent {
    pub time: f32,
}

pub fn toggle_pause_observer(
    _trigger: On<TogglePauseEvent>,
    mut playback: ResMut<Playback>,
    panel: Option<ResMut<ControlPanel>>,
) {
    let paused = playback.toggle_pause();
    if let Some(mut panel) = panel {
        panel.pause.on = paused;
    }
    info!("Playback {}", if paused { "paused" } else { "resumed" });
}

pub fn rate_change_observer(
    trigger: On<RateChangeEvent>,
    mut playback: ResMut<Playback>,
    panel: Option<ResMut<ControlPanel>>,
) {
    playback.set_rate(trigger.event().rate);
    if let Some(mut panel) = panel {
        panel.rate.set_value(playback.rate);
    }
    info!("Playback rate {:.1}", playback.rate);
}

pub fn scrub_observer(
    trigger: On<ScrubEvent>,
    mut ctx: SimulationContext,
    panel: Option<ResMut<ControlPanel>>,
) {
    update_simulation(&mut ctx, trigger.event().time);
    if let Some(mut panel) = panel {
        panel.scrubber.set_value(ctx.playback.simulation_time);
    }
}
