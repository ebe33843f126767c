//! Simulation configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 900
//! height = 600
//! target_fps = 60
//!
//! [scheduler]
//! frame_ms = 33
//!
//! [world]
//! y_min = 0
//! y_max = 80
//! margin_frac = 0.15
//!
//! [physics]
//! gravity = 9.81
//! alpha_height = 80
//! alpha_velocity = 0
//! beta_height = 0
//! beta_velocity = 20
//!
//! [figures]
//! size = 0.02
//! alpha_x = -10
//! beta_x = 0
//! alpha_label_dx = -45
//! beta_label_dx = 8
//!
//! [playback]
//! rate = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::kinematics::STANDARD_GRAVITY;
use crate::resources::playback::{DEFAULT_RATE, parse_rate};
use crate::resources::scheduler::DEFAULT_FRAME_MS;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 900;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_Y_MIN: f32 = 0.0;
const DEFAULT_Y_MAX: f32 = 80.0;
const DEFAULT_MARGIN_FRAC: f32 = 0.15;
const DEFAULT_FIGURE_SIZE: f32 = 0.02;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Simulation configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second of the render loop.
    pub target_fps: u32,
    /// Scheduler tick interval in milliseconds.
    pub frame_ms: u32,
    /// Vertical range kept visible.
    pub y_min: f32,
    pub y_max: f32,
    /// Extra room above and below the range, as a fraction of it.
    pub margin_frac: f32,
    pub gravity: f32,
    pub alpha_height: f32,
    pub alpha_velocity: f32,
    pub beta_height: f32,
    pub beta_velocity: f32,
    /// Figure scale; the shell radius is 100 local units.
    pub figure_size: f32,
    pub alpha_x: f32,
    pub beta_x: f32,
    /// Horizontal label offsets from each body, world units.
    pub alpha_label_dx: f32,
    pub beta_label_dx: f32,
    /// Initial playback rate.
    pub rate: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            frame_ms: DEFAULT_FRAME_MS,
            y_min: DEFAULT_Y_MIN,
            y_max: DEFAULT_Y_MAX,
            margin_frac: DEFAULT_MARGIN_FRAC,
            gravity: STANDARD_GRAVITY,
            alpha_height: 80.0,
            alpha_velocity: 0.0,
            beta_height: 0.0,
            beta_velocity: 20.0,
            figure_size: DEFAULT_FIGURE_SIZE,
            alpha_x: -10.0,
            beta_x: 0.0,
            alpha_label_dx: -45.0,
            beta_label_dx: 8.0,
            rate: DEFAULT_RATE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Values that
    /// fail to parse are logged and ignored.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [scheduler] section
        if let Some(ms) = config.getuint("scheduler", "frame_ms").ok().flatten() {
            self.frame_ms = (ms as u32).max(1);
        }

        // [world] section
        read_float(&config, "world", "y_min", &mut self.y_min);
        read_float(&config, "world", "y_max", &mut self.y_max);
        read_float(&config, "world", "margin_frac", &mut self.margin_frac);

        // [physics] section
        read_float(&config, "physics", "gravity", &mut self.gravity);
        read_float(&config, "physics", "alpha_height", &mut self.alpha_height);
        read_float(&config, "physics", "alpha_velocity", &mut self.alpha_velocity);
        read_float(&config, "physics", "beta_height", &mut self.beta_height);
        read_float(&config, "physics", "beta_velocity", &mut self.beta_velocity);

        // [figures] section
        read_float(&config, "figures", "size", &mut self.figure_size);
        read_float(&config, "figures", "alpha_x", &mut self.alpha_x);
        read_float(&config, "figures", "beta_x", &mut self.beta_x);
        read_float(&config, "figures", "alpha_label_dx", &mut self.alpha_label_dx);
        read_float(&config, "figures", "beta_label_dx", &mut self.beta_label_dx);

        // [playback] section
        if let Some(text) = config.get("playback", "rate") {
            self.rate = parse_rate(&text);
        }

        info!(
            "Loaded config: {}x{} window, fps={}, tick={} ms, g={}, rate={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.frame_ms,
            self.gravity,
            self.rate
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set("scheduler", "frame_ms", Some(self.frame_ms.to_string()));

        config.set("world", "y_min", Some(self.y_min.to_string()));
        config.set("world", "y_max", Some(self.y_max.to_string()));
        config.set("world", "margin_frac", Some(self.margin_frac.to_string()));

        config.set("physics", "gravity", Some(self.gravity.to_string()));
        config.set("physics", "alpha_height", Some(self.alpha_height.to_string()));
        config.set("physics", "alpha_velocity", Some(self.alpha_velocity.to_string()));
        config.set("physics", "beta_height", Some(self.beta_height.to_string()));
        config.set("physics", "beta_velocity", Some(self.beta_velocity.to_string()));

        config.set("figures", "size", Some(self.figure_size.to_string()));
        config.set("figures", "alpha_x", Some(self.alpha_x.to_string()));
        config.set("figures", "beta_x", Some(self.beta_x.to_string()));
        config.set("figures", "alpha_label_dx", Some(self.alpha_label_dx.to_string()));
        config.set("figures", "beta_label_dx", Some(self.beta_label_dx.to_string()));

        config.set("playback", "rate", Some(self.rate.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

fn read_float(config: &Ini, section: &str, key: &str, target: &mut f32) {
    match config.getfloat(section, key) {
        Ok(Some(value)) => *target = value as f32,
        Ok(None) => {}
        Err(e) => warn!("Ignoring [{}] {}: {}", section, key, e),
    }
}
