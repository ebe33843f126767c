//! Simulation systems.
//!
//! This module groups the functions that advance the simulation, handle
//! input and draw. Some are regular ECS systems run from a schedule; the
//! scheduler tick and the figure API take `&mut World` directly because
//! they run registered systems themselves.
//!
//! Submodules overview
//! - [`controller`] – apply motion controller state to figures and labels
//! - [`figure`] – turtle figure drawing and the figure API
//! - [`input`] – read hardware input and trigger playback events
//! - [`movement`] – per-figure frame step (phase, velocity, redraw)
//! - [`playback`] – per-frame playback callback and simulation update
//! - [`render`] – draw the canvas, controls and debug overlay using Raylib
//! - [`scheduler`] – poll the frame scheduler and run ticks
//! - [`time`] – update the scheduler clock
//! - [`view`] – fit the world view and draw the ground line

pub mod controller;
pub mod figure;
pub mod input;
pub mod movement;
pub mod playback;
pub mod render;
pub mod scheduler;
pub mod time;
pub mod view;
