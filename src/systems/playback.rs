//! Playback driver.
//!
//! [`playback_frame`] is registered as a scheduler frame callback. Each tick
//! it moves the simulation clock by `rate * dt` (unless paused or the rate
//! is zero), keeps the scrub slider in sync, then recomputes both compared
//! bodies with [`update_simulation`].

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::debug;

use crate::components::label::Label;
use crate::resources::canvas::Canvas;
use crate::resources::controls::ControlPanel;
use crate::resources::playback::{ComparedBodies, Playback};
use crate::systems::controller::{ControlledBodies, set_time, update_label};

/// Everything needed to recompute the compared bodies.
#[derive(SystemParam)]
pub struct SimulationContext<'w, 's> {
    pub playback: ResMut<'w, Playback>,
    pub pair: Option<Res<'w, ComparedBodies>>,
    pub bodies: ControlledBodies<'w, 's>,
    pub labels: Query<'w, 's, &'static Label>,
    pub canvas: ResMut<'w, Canvas>,
}

/// Clamp `time`, store it as the simulation time and move both compared
/// bodies there. Labels show each body's height relative to the other.
pub fn update_simulation(ctx: &mut SimulationContext, time: f32) {
    let time = ctx.playback.clamp_time(time);
    ctx.playback.simulation_time = time;

    let Some(pair) = ctx.pair.as_deref().copied() else {
        return;
    };
    let canvas = &mut *ctx.canvas;
    let first = set_time(&mut ctx.bodies, canvas, pair.first, time);
    let second = set_time(&mut ctx.bodies, canvas, pair.second, time);

    if let (Some(a), Some(b)) = (first, second) {
        let relative = a.height - b.height;
        update_label(&ctx.bodies, &ctx.labels, canvas, pair.first, relative);
        update_label(&ctx.bodies, &ctx.labels, canvas, pair.second, -relative);
    }
}

/// Frame callback advancing the playback clock by one tick.
pub fn playback_frame(
    In(dt): In<f32>,
    mut ctx: SimulationContext,
    panel: Option<ResMut<ControlPanel>>,
) {
    if ctx.playback.advance(dt) {
        if let Some(mut panel) = panel {
            panel.scrubber.set_value(ctx.playback.simulation_time);
        }
    }
    let time = ctx.playback.simulation_time;
    update_simulation(&mut ctx, time);
    debug!("simulation time {:.3}", time);
}

/// Recompute the compared bodies at the current simulation time.
pub fn refresh_simulation(mut ctx: SimulationContext) {
    let time = ctx.playback.simulation_time;
    update_simulation(&mut ctx, time);
}
