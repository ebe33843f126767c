//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulation. A figure entity combines most of them; labels, the ground
//! line and the key hint are plain canvas owners with a single marker.
//!
//! Submodules overview:
//! - [`figure`] – marker for entities drawn as a turtle figure
//! - [`ground`] – owner of the ground line
//! - [`label`] – text style of a body label, and the startup hint marker
//! - [`limbanimation`] – walking-cycle phase and speed
//! - [`mapposition`] – world-space position of an entity
//! - [`motioncontroller`] – binds a figure to an analytic trajectory
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`rotation`] – orientation in degrees
//! - [`scale`] – uniform size factor

pub mod figure;
pub mod ground;
pub mod label;
pub mod limbanimation;
pub mod mapposition;
pub mod motioncontroller;
pub mod rigidbody;
pub mod rotation;
pub mod scale;
