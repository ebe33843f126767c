//! suvat library.
//!
//! This module exposes the simulation's kinematics, ECS components,
//! resources, systems and events for use in integration tests and as a
//! reusable library.

pub mod components;
pub mod events;
pub mod game;
pub mod kinematics;
pub mod resources;
pub mod systems;
