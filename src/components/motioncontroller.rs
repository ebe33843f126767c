//! Binds a figure to an analytic trajectory.
//!
//! A [`MotionController`] owns the simulation time of one body and the
//! [`MotionState`] derived from it. Setting the time recomputes height and
//! velocity from the body's [`Trajectory`]; nothing is integrated, so
//! scrubbing backwards and forwards is exact.
//!
//! The component only holds the numbers. Writing them back into the body's
//! position and velocity and redrawing the figure is done by
//! [`crate::systems::controller`].

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::kinematics::{MotionState, Trajectory};

#[derive(Component, Clone, Debug)]
pub struct MotionController {
    pub trajectory: Trajectory,
    /// Fixed horizontal position of the body.
    pub x_position: f32,
    pub initial_height: f32,
    pub current_time: f32,
    pub current_height: f32,
    pub current_velocity: f32,
    /// Height change since `t = 0`.
    pub total_displacement: f32,
    /// Entity whose canvas layer carries this body's text label.
    pub label: Option<Entity>,
    /// Label anchor relative to `(x_position, current_height)`, world units.
    pub label_offset: Vector2,
}

impl MotionController {
    pub fn new(trajectory: Trajectory, x_position: f32) -> Self {
        Self {
            trajectory,
            x_position,
            initial_height: trajectory.initial_height,
            current_time: 0.0,
            current_height: trajectory.initial_height,
            current_velocity: 0.0,
            total_displacement: 0.0,
            label: None,
            label_offset: Vector2 { x: 40.0, y: 0.0 },
        }
    }

    /// Attach a label entity drawn at `offset` from the body.
    pub fn with_label(mut self, label: Entity, offset: Vector2) -> Self {
        self.label = Some(label);
        self.label_offset = offset;
        self
    }

    /// Move to elapsed time `time` (clamped to `>= 0`) and return the new state.
    pub fn set_time(&mut self, time: f32) -> MotionState {
        let state = self.trajectory.state_at(time);
        self.current_time = state.time;
        self.current_height = state.height;
        self.current_velocity = state.velocity;
        self.total_displacement = self.current_height - self.initial_height;
        state
    }

    /// Advance by `dt` seconds from the current time.
    pub fn step(&mut self, dt: f32) -> MotionState {
        self.set_time(self.current_time + dt)
    }

    pub fn get_height(&self) -> f32 {
        self.current_height
    }

    pub fn state(&self) -> MotionState {
        MotionState {
            time: self.current_time,
            height: self.current_height,
            velocity: self.current_velocity,
        }
    }

    /// Where the body should be drawn.
    pub fn pose(&self) -> Vector2 {
        Vector2 {
            x: self.x_position,
            y: self.current_height,
        }
    }

    /// Top-left anchor of the label text, world units.
    pub fn label_anchor(&self) -> Vector2 {
        Vector2 {
            x: self.x_position + self.label_offset.x,
            y: self.current_height + self.label_offset.y,
        }
    }

    /// Label text; `relative_delta` is this body's height minus the other's.
    pub fn label_text(&self, relative_delta: f32) -> String {
        format!(
            "v: {:+.2} m/s\nds: {:+.2} m\ndy: {:+.2} m",
            self.current_velocity, self.total_displacement, relative_delta
        )
    }
}
