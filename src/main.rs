//! suvat main entry point.
//!
//! A kinematic free-fall visualizer written in Rust using:
//! - **raylib** for windowing, drawing and input
//! - **bevy_ecs** for entity-component-system architecture
//!
//! Two turtle figures fall under constant gravity: Alpha is dropped from a
//! height, Beta is thrown up from the ground. Their motion is computed in
//! closed form from the playback clock, which can be paused, scrubbed and
//! played at any rate between -3x and 3x.
//!
//! # Main Loop
//!
//! 1. Parse the command line, load `config.ini`, open the window
//! 2. Build the simulation with [`game::setup`]
//! 3. Every frame:
//!    - Read input and turn it into playback events
//!    - Poll the frame scheduler with the raylib clock (fires timers, ticks)
//!    - Draw the last presented canvas frame and the controls
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod kinematics;
mod resources;
mod systems;

use crate::resources::gameconfig::GameConfig;
use crate::resources::screensize::ScreenSize;
use crate::systems::input::{apply_playback_controls, update_input_state};
use crate::systems::render::render_system;
use crate::systems::scheduler::run_due;
use crate::systems::view::refit_world_view;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Kinematic free-fall visualizer
#[derive(Parser)]
#[command(version, about = "Two falling turtles, one closed-form equation.")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("suvat")
        .build();
    rl.set_target_fps(config.target_fps);

    let screen = ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(config);
    game::setup(&mut world, screen);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut update = Schedule::default();
    update.add_systems((update_input_state, apply_playback_controls, refit_world_view).chain());

    let mut render = Schedule::default();
    render.add_systems(render_system);

    update
        .initialize(&mut world)
        .expect("Failed to initialize update schedule");
    render
        .initialize(&mut world)
        .expect("Failed to initialize render schedule");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        update.run(&mut world);

        let now = world.non_send_resource::<raylib::RaylibHandle>().get_time();
        run_due(&mut world, now);

        render.run(&mut world);

        world.clear_trackers();

        // Track window size (may change due to resize)
        let size = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            ScreenSize {
                w: rl.get_screen_width(),
                h: rl.get_screen_height(),
            }
        };
        world.resource_mut::<ScreenSize>().set_if_neq(size);
    }
    log::info!("Window closed");
}
