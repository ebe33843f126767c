//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `canvas` – retained, per-owner display list and the render surface trait
//! - `controls` – on-screen sliders and pause button
//! - `debugmode` – presence toggles the diagnostics overlay
//! - `gameconfig` – settings loaded from the INI file
//! - `input` – per-frame keyboard and mouse state
//! - `playback` – simulation clock, rate and pause flag
//! - `scheduler` – fixed-interval frame scheduler and one-shot timers
//! - `screensize` – current window dimensions in pixels
//! - `worldtime` – accumulated scheduler time
//! - `worldview` – visible world rectangle and world/screen mapping
pub mod canvas;
pub mod controls;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod playback;
pub mod scheduler;
pub mod screensize;
pub mod worldtime;
pub mod worldview;
