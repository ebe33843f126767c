//! Playback clock for the simulation.
//!
//! [`Playback`] holds the simulation time shown on screen together with the
//! playback rate and the pause flag. The scheduler's per-frame callback
//! advances it by `rate * dt`; the scrub slider sets it directly. Every
//! value that reaches it is clamped to `[0, max_time]`, where `max_time` is
//! the moment the last body lands.
//!
//! [`ComparedBodies`] names the two controlled figures whose heights are
//! compared in the labels.

use bevy_ecs::prelude::*;
use log::warn;

pub const DEFAULT_RATE: f32 = 1.0;
pub const MIN_RATE: f32 = -3.0;
pub const MAX_RATE: f32 = 3.0;
pub const RATE_STEP: f32 = 0.1;
pub const SCRUB_STEP: f32 = 0.1;

/// Parse a playback rate, falling back to [`DEFAULT_RATE`] with a warning
/// when `text` is not a finite number. Range clamping is left to
/// [`Playback::set_rate`].
pub fn parse_rate(text: &str) -> f32 {
    match text.trim().parse::<f32>() {
        Ok(rate) if rate.is_finite() => rate,
        _ => {
            warn!("Playback rate '{text}' is not a number, using {DEFAULT_RATE}");
            DEFAULT_RATE
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Playback {
    /// Simulated seconds per real second. Negative plays backwards.
    pub rate: f32,
    pub paused: bool,
    pub simulation_time: f32,
    /// Upper bound of `simulation_time`.
    pub max_time: f32,
}

impl Playback {
    pub fn new(max_time: f32) -> Self {
        Self {
            rate: DEFAULT_RATE,
            paused: false,
            simulation_time: 0.0,
            max_time: max_time.max(0.0),
        }
    }

    /// Clamp `value` into `[0, max_time]`. NaN maps to `0`.
    pub fn clamp_time(&self, value: f32) -> f32 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, self.max_time)
    }

    /// Set the playback rate, falling back to the default for non-finite input.
    pub fn set_rate(&mut self, rate: f32) {
        if !rate.is_finite() {
            warn!("Invalid playback rate {rate}, using {DEFAULT_RATE}");
            self.rate = DEFAULT_RATE;
            return;
        }
        self.rate = rate.clamp(MIN_RATE, MAX_RATE);
    }

    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Move the simulation clock forward by one frame of `dt` real seconds.
    ///
    /// Returns `true` if the simulation time changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.paused || self.rate == 0.0 {
            return false;
        }
        let next = self.clamp_time(self.simulation_time + self.rate * dt);
        if next == self.simulation_time {
            return false;
        }
        self.simulation_time = next;
        true
    }
}

/// The two figures compared by the labels' `dy` line.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ComparedBodies {
    pub first: Entity,
    pub second: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn clamp_time_bounds() {
        let p = Playback::new(4.0);
        assert_eq!(p.clamp_time(-1.0), 0.0);
        assert_eq!(p.clamp_time(9.0), 4.0);
        assert_eq!(p.clamp_time(2.5), 2.5);
        assert_eq!(p.clamp_time(f32::NAN), 0.0);
    }

    #[test]
    fn non_numeric_rate_falls_back_to_default() {
        let mut p = Playback::new(4.0);
        assert_eq!(parse_rate("fast"), DEFAULT_RATE);
        assert_eq!(parse_rate("NaN"), DEFAULT_RATE);
        assert_eq!(parse_rate(""), DEFAULT_RATE);
        p.set_rate(f32::INFINITY);
        assert_eq!(p.rate, DEFAULT_RATE);
    }

    #[test]
    fn rate_is_parsed_and_clamped() {
        let mut p = Playback::new(4.0);
        p.set_rate(parse_rate(" -1.5 "));
        assert_eq!(p.rate, -1.5);
        p.set_rate(10.0);
        assert_eq!(p.rate, MAX_RATE);
    }

    #[test]
    fn advance_respects_pause_and_rate() {
        let mut p = Playback::new(4.0);
        assert!(p.advance(0.5));
        assert!((p.simulation_time - 0.5).abs() < EPSILON);

        p.toggle_pause();
        assert!(!p.advance(0.5));
        p.toggle_pause();

        p.set_rate(-2.0);
        assert!(p.advance(0.1));
        assert!((p.simulation_time - 0.3).abs() < EPSILON);

        p.set_rate(0.0);
        assert!(!p.advance(1.0));
    }

    #[test]
    fn advance_stops_at_the_ends() {
        let mut p = Playback::new(1.0);
        p.set_rate(3.0);
        assert!(p.advance(1.0));
        assert_eq!(p.simulation_time, 1.0);
        assert!(!p.advance(1.0));

        p.set_rate(-3.0);
        assert!(p.advance(1.0));
        assert_eq!(p.simulation_time, 0.0);
        assert!(!p.advance(1.0));
    }
}
