//! Scene setup.
//!
//! [`setup`] builds the whole simulation on a [`World`]: resources,
//! observers, the ground line, the two figures (Alpha dropped from its
//! initial height, Beta launched from the ground), their labels and motion
//! controllers, the playback frame callback and the startup key hint.
//!
//! It needs no window, so the integration tests run the same setup as the
//! program.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::RunSystemOnce;
use log::{info, warn};
use raylib::prelude::Vector2;

use crate::components::ground::Ground;
use crate::components::label::{Hint, Label};
use crate::components::motioncontroller::MotionController;
use crate::events::playback::{rate_change_observer, scrub_observer, toggle_pause_observer};
use crate::events::switchdebug::switch_debug_observer;
use crate::kinematics::Trajectory;
use crate::resources::canvas::{Canvas, RenderSurface};
use crate::resources::controls::ControlPanel;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::playback::{ComparedBodies, Playback};
use crate::resources::scheduler::FrameScheduler;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;
use crate::systems::figure::{animate_figure, move_figure, spawn_figure};
use crate::systems::playback::{playback_frame, refresh_simulation};
use crate::systems::view::{draw_ground, draw_hint, fitted_view};

/// How long the key hint stays on screen.
pub const HINT_MS: u32 = 5000;
/// Walking cycles per second of both figures.
const WALK_SPEED: f32 = 1.0;

/// Build the simulation for a window of `screen` pixels.
///
/// Uses the [`GameConfig`] resource if present, defaults otherwise.
pub fn setup(world: &mut World, screen: ScreenSize) -> ComparedBodies {
    let config = world.get_resource::<GameConfig>().cloned().unwrap_or_default();
    let view = fitted_view(&config, screen);

    world.insert_resource(screen);
    world.insert_resource(Canvas::new(view));
    world.insert_resource(FrameScheduler::new(config.frame_ms));
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    if !world.contains_resource::<GameConfig>() {
        world.insert_resource(config.clone());
    }

    let alpha_trajectory = Trajectory::new(config.alpha_height, config.alpha_velocity, config.gravity);
    let beta_trajectory = Trajectory::new(config.beta_height, config.beta_velocity, config.gravity);
    let max_time = alpha_trajectory
        .landing_time()
        .max(beta_trajectory.landing_time());
    let mut playback = Playback::new(max_time);
    playback.set_rate(config.rate);
    world.insert_resource(ControlPanel::new(&playback, screen.w));
    world.insert_resource(playback);

    world.spawn(Observer::new(toggle_pause_observer));
    world.spawn(Observer::new(rate_change_observer));
    world.spawn(Observer::new(scrub_observer));
    world.spawn(Observer::new(switch_debug_observer));
    world.flush();

    let ground = world.spawn(Ground { y: 0.0 }).id();
    draw_ground(&mut *world.resource_mut::<Canvas>(), ground, &view, 0.0);

    let alpha = spawn_figure(
        world,
        config.figure_size,
        config.alpha_x,
        config.alpha_height,
        0.0,
    );
    let beta = spawn_figure(world, config.figure_size, config.beta_x, config.beta_height, 0.0);
    for body in [alpha, beta] {
        move_figure(world, body, 0.0, 0.0);
        animate_figure(world, body, WALK_SPEED);
    }

    let alpha_label = world.spawn(Label::default()).id();
    let beta_label = world.spawn(Label::default()).id();
    world.entity_mut(alpha).insert(
        MotionController::new(alpha_trajectory, config.alpha_x).with_label(
            alpha_label,
            Vector2 {
                x: config.alpha_label_dx,
                y: 0.0,
            },
        ),
    );
    world.entity_mut(beta).insert(
        MotionController::new(beta_trajectory, config.beta_x).with_label(
            beta_label,
            Vector2 {
                x: config.beta_label_dx,
                y: 0.0,
            },
        ),
    );

    let pair = ComparedBodies {
        first: alpha,
        second: beta,
    };
    world.insert_resource(pair);

    let frame = world.register_system(playback_frame);
    world
        .resource_mut::<FrameScheduler>()
        .add_frame_callback(frame);

    let hint = world.spawn(Hint).id();
    draw_hint(&mut *world.resource_mut::<Canvas>(), hint, &view);
    let hide = world.register_system(hide_hint);
    world
        .resource_mut::<FrameScheduler>()
        .sleep_nonblocking(HINT_MS, hide);

    if let Err(e) = world.run_system_once(refresh_simulation) {
        warn!("Initial simulation update failed: {}", e);
    }
    world.resource_mut::<Canvas>().present();

    info!(
        "Simulation ready: alpha lands at {:.2} s, beta at {:.2} s",
        alpha_trajectory.landing_time(),
        beta_trajectory.landing_time()
    );
    pair
}

/// Remove the startup key hint for good.
pub fn hide_hint(mut commands: Commands, mut canvas: ResMut<Canvas>, hints: Query<Entity, With<Hint>>) {
    for hint in hints.iter() {
        canvas.clear(hint);
        commands.entity(hint).despawn();
    }
}
