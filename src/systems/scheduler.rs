//! Frame scheduler tick.
//!
//! [`run_due`] is called by the main loop with the current monotonic clock.
//! It fires due one-shot timers and, when the tick interval has elapsed,
//! runs exactly one [`tick`]:
//!
//! 1. advance the walking phase of every registered, animating figure,
//! 2. integrate every registered figure's velocity into its position,
//! 3. redraw every registered figure,
//! 4. run every per-frame callback with the nominal `dt`, in registration
//!    order,
//! 5. present the canvas.
//!
//! Steps 1 to 3 happen figure by figure, and all of them finish before the
//! first callback runs, so callbacks always see post-motion state.
//! Callback failures are logged and do not abort the tick.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::resources::canvas::{Canvas, RenderSurface};
use crate::resources::scheduler::FrameScheduler;
use crate::systems::movement::frame_step;
use crate::systems::time::update_world_time;

/// Fire due timers and run a tick if one is due at `now` (seconds).
///
/// Returns `true` if a tick ran.
pub fn run_due(world: &mut World, now: f64) -> bool {
    let due_timers = {
        let mut scheduler = world.resource_mut::<FrameScheduler>();
        scheduler.observe_clock(now);
        scheduler.take_due_timers(now)
    };
    for timer in due_timers {
        if let Err(e) = world.run_system(timer.callback) {
            warn!("One-shot timer callback failed: {}", e);
        }
    }

    if !world.resource::<FrameScheduler>().tick_due(now) {
        return false;
    }
    tick(world);
    world.resource_mut::<FrameScheduler>().mark_ticked(now);
    true
}

/// Run one scheduler tick immediately, regardless of pacing.
///
/// Does nothing while the scheduler is inert.
pub fn tick(world: &mut World) {
    let (dt, bodies, callbacks) = {
        let scheduler = world.resource::<FrameScheduler>();
        if !scheduler.is_running() {
            return;
        }
        (
            scheduler.dt(),
            scheduler.bodies().to_vec(),
            scheduler.callbacks().to_vec(),
        )
    };

    update_world_time(world, dt);

    for body in bodies {
        if !frame_step(world, body, dt) {
            warn!("Registered figure {:?} no longer exists; skipping", body);
        }
    }

    for callback in callbacks {
        if let Err(e) = world.run_system_with(callback, dt) {
            warn!("Frame callback failed: {}", e);
        }
    }

    world.resource_mut::<Canvas>().present();
    debug!("tick done (dt = {dt})");
}
