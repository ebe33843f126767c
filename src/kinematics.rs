//! Closed-form vertical motion under constant gravity.
//!
//! A [`Trajectory`] describes a body launched vertically from an initial
//! height with an initial velocity. [`Trajectory::state_at`] evaluates the
//! SUVAT equations at any elapsed time:
//!
//! ```text
//! height   = h0 + v0 * t - 0.5 * g * t^2
//! velocity = v0 - g * t
//! ```
//!
//! The ground is an inelastic stop: as soon as the computed height is at or
//! below zero the body is reported at rest, `(0, 0)`, and stays there for
//! every later time.
//!
//! [`StepIntegrator`] is a second formulation that advances a small state
//! machine by fixed 1 ms micro-steps. The running program never uses it; it
//! exists so tests can cross-check the closed form against an independent
//! discretisation.

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Duration of one [`StepIntegrator`] micro-step in seconds.
pub const MICRO_STEP: f64 = 0.001;

/// Derived vertical state of a body at a given elapsed time.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MotionState {
    /// Elapsed time in seconds, never negative.
    pub time: f32,
    /// Height above the ground in metres, never negative.
    pub height: f32,
    /// Vertical velocity in m/s, positive upwards.
    pub velocity: f32,
}

impl MotionState {
    /// True once the body has reached the ground and stopped.
    pub fn is_resting(&self) -> bool {
        self.height == 0.0 && self.velocity == 0.0
    }
}

/// Parameters of one body's vertical trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trajectory {
    /// Height at `t = 0`, metres.
    pub initial_height: f32,
    /// Vertical velocity at `t = 0`, m/s, positive upwards.
    pub initial_velocity: f32,
    /// Downward acceleration magnitude, m/s².
    pub gravity: f32,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new(0.0, 0.0, STANDARD_GRAVITY)
    }
}

impl Trajectory {
    pub fn new(initial_height: f32, initial_velocity: f32, gravity: f32) -> Self {
        Self {
            initial_height,
            initial_velocity,
            gravity,
        }
    }

    /// A body dropped from rest at `height`.
    pub fn dropped_from(height: f32, gravity: f32) -> Self {
        Self::new(height, 0.0, gravity)
    }

    /// A body thrown straight up from the ground.
    pub fn launched_at(velocity: f32, gravity: f32) -> Self {
        Self::new(0.0, velocity, gravity)
    }

    /// Evaluate height and velocity at elapsed time `time`.
    ///
    /// Negative (and NaN) times are treated as `0`. Once the body touches
    /// the ground the result is pinned to `(0, 0)`.
    pub fn state_at(&self, time: f32) -> MotionState {
        let t = clamp_time(time);
        let height =
            self.initial_height + self.initial_velocity * t - 0.5 * self.gravity * t * t;
        let velocity = self.initial_velocity - self.gravity * t;
        if height <= 0.0 {
            return MotionState {
                time: t,
                height: 0.0,
                velocity: 0.0,
            };
        }
        MotionState {
            time: t,
            height,
            velocity,
        }
    }

    /// Time at which the body reaches the ground.
    ///
    /// Returns `0.0` when gravity is not positive, since the body would
    /// never come back down.
    pub fn landing_time(&self) -> f32 {
        if self.gravity <= 0.0 {
            return 0.0;
        }
        let v0 = self.initial_velocity;
        let discriminant = v0 * v0 + 2.0 * self.gravity * self.initial_height.max(0.0);
        ((v0 + discriminant.sqrt()) / self.gravity).max(0.0)
    }

    /// Time and height of the highest point of the flight.
    pub fn apex(&self) -> (f32, f32) {
        if self.gravity <= 0.0 || self.initial_velocity <= 0.0 {
            return (0.0, self.initial_height.max(0.0));
        }
        let t = self.initial_velocity / self.gravity;
        (t, self.state_at(t).height)
    }
}

fn clamp_time(time: f32) -> f32 {
    if time.is_nan() { 0.0 } else { time.max(0.0) }
}

/// Direction of travel tracked by the [`StepIntegrator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
    Resting,
}

/// Fixed micro-step reference model of the same motion.
///
/// Each call to [`advance`](StepIntegrator::advance) adds `dt` to an
/// accumulator and runs as many 1 ms micro-steps as fit; the remainder is
/// carried into the next call. The integrator flips from ascending to
/// descending when the velocity crosses zero and stops for good once it
/// reaches the ground on the way down.
#[derive(Clone, Debug)]
pub struct StepIntegrator {
    height: f64,
    velocity: f64,
    acceleration: f64,
    direction: Direction,
    elapsed: f64,
    steps: u64,
}

impl StepIntegrator {
    pub fn new(trajectory: &Trajectory) -> Self {
        let height = f64::from(trajectory.initial_height.max(0.0));
        let velocity = f64::from(trajectory.initial_velocity);
        let direction = if velocity > 0.0 {
            Direction::Ascending
        } else if height > 0.0 {
            Direction::Descending
        } else {
            Direction::Resting
        };
        let (velocity, acceleration) = if direction == Direction::Resting {
            (0.0, 0.0)
        } else {
            (velocity, -f64::from(trajectory.gravity))
        };
        Self {
            height,
            velocity,
            acceleration,
            direction,
            elapsed: 0.0,
            steps: 0,
        }
    }

    /// Advance simulated time by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 || dt.is_nan() {
            return;
        }
        self.elapsed += f64::from(dt);
        // The small bias keeps exact multiples of the step from losing one
        // step to rounding.
        let due = ((self.elapsed / MICRO_STEP) + 1e-6).floor() as u64;
        while self.steps < due {
            self.micro_step();
            self.steps += 1;
        }
    }

    /// Time accumulated but not yet consumed by a micro-step.
    pub fn residual(&self) -> f64 {
        (self.elapsed - self.steps as f64 * MICRO_STEP).max(0.0)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> MotionState {
        MotionState {
            time: self.elapsed as f32,
            height: self.height as f32,
            velocity: self.velocity as f32,
        }
    }

    fn micro_step(&mut self) {
        if self.direction == Direction::Resting {
            return;
        }
        let h = MICRO_STEP;
        let displacement = self.velocity * h + 0.5 * self.acceleration * h * h;
        self.velocity += self.acceleration * h;
        self.height += displacement;

        match self.direction {
            Direction::Ascending if self.velocity <= 0.0 => {
                self.direction = Direction::Descending;
            }
            Direction::Descending if self.height <= 0.0 => {
                self.height = 0.0;
                self.velocity = 0.0;
                self.acceleration = 0.0;
                self.direction = Direction::Resting;
            }
            _ => {}
        }
    }
}
