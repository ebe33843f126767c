//! Event types and observers.
//!
//! Input systems never change playback state directly; they trigger events
//! and the observers in these modules apply them.
//!
//! Submodules:
//! - [`playback`] – pause, rate and scrub requests
//! - [`switchdebug`] – toggle the diagnostics overlay on/off
pub mod playback;
pub mod switchdebug;
