//! Fixed-interval frame scheduler.
//!
//! [`FrameScheduler`] is the single ticker that drives every animated
//! figure. It holds:
//!
//! - an insertion-ordered, deduplicated list of registered figure entities,
//! - an insertion-ordered, deduplicated list of per-frame callbacks
//!   (registered systems taking the nominal `dt` as input),
//! - pending one-shot timers created by [`FrameScheduler::sleep_nonblocking`],
//! - the [`SchedulerState`] and the deadline of the next tick.
//!
//! The scheduler is inert until something is registered with it (or it is
//! started explicitly). Once running it never stops on its own. Ticks are
//! paced against a monotonic clock supplied by the caller; the `dt` handed
//! to figures and callbacks is always the configured interval, with no
//! compensation for late or missed ticks.
//!
//! The scheduler only keeps the books. The tick itself needs the whole
//! [`World`] and lives in [`crate::systems::scheduler`].

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use log::info;

/// Default tick interval, roughly 30 frames per second.
pub const DEFAULT_FRAME_MS: u32 = 33;

/// Per-frame callback: a registered system receiving the tick's `dt`.
pub type FrameCallback = SystemId<In<f32>>;

/// Lifecycle of the scheduler. `Running` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Inert,
    Running,
}

/// One-shot timer waiting to fire.
#[derive(Clone, Copy, Debug)]
pub struct PendingTimer {
    /// Clock time (seconds) at or after which the callback runs.
    pub due_at: f64,
    pub callback: SystemId,
    /// Scheduling order, used to break ties between equal deadlines.
    pub sequence: u64,
}

#[derive(Resource, Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    frame_ms: u32,
    bodies: Vec<Entity>,
    callbacks: Vec<FrameCallback>,
    timers: Vec<PendingTimer>,
    timer_sequence: u64,
    next_tick_at: Option<f64>,
    last_poll: f64,
    ticks: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_MS)
    }
}

impl FrameScheduler {
    /// Create an inert scheduler ticking every `frame_ms` milliseconds.
    pub fn new(frame_ms: u32) -> Self {
        Self {
            state: SchedulerState::Inert,
            frame_ms: frame_ms.max(1),
            bodies: Vec::new(),
            callbacks: Vec::new(),
            timers: Vec::new(),
            timer_sequence: 0,
            next_tick_at: None,
            last_poll: 0.0,
            ticks: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn frame_ms(&self) -> u32 {
        self.frame_ms
    }

    /// Nominal seconds per tick, the `dt` passed to figures and callbacks.
    pub fn dt(&self) -> f32 {
        self.frame_ms as f32 / 1000.0
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn bodies(&self) -> &[Entity] {
        &self.bodies
    }

    pub fn callbacks(&self) -> &[FrameCallback] {
        &self.callbacks
    }

    /// Transition `Inert -> Running`. Returns `true` only on the transition.
    ///
    /// The first tick is due on the first poll after starting.
    pub fn start(&mut self) -> bool {
        if self.state == SchedulerState::Running {
            return false;
        }
        self.state = SchedulerState::Running;
        self.next_tick_at = None;
        info!("Frame scheduler running at {} ms per tick", self.frame_ms);
        true
    }

    /// Register a figure. Returns `false` if it was already registered.
    /// Starts the scheduler either way.
    pub fn register_body(&mut self, body: Entity) -> bool {
        let added = if self.bodies.contains(&body) {
            false
        } else {
            self.bodies.push(body);
            true
        };
        self.start();
        added
    }

    /// Register a per-frame callback. Returns `false` if already present.
    pub fn add_frame_callback(&mut self, callback: FrameCallback) -> bool {
        if self.callbacks.contains(&callback) {
            return false;
        }
        self.callbacks.push(callback);
        true
    }

    /// Remove a per-frame callback. Returns `false` if it was not present.
    pub fn remove_frame_callback(&mut self, callback: FrameCallback) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|c| *c != callback);
        self.callbacks.len() != before
    }

    /// Run `callback` once, `ms` milliseconds after the last poll.
    ///
    /// The callback fires on the first poll at or after its deadline, on the
    /// same thread as the ticks.
    pub fn sleep_nonblocking(&mut self, ms: u32, callback: SystemId) {
        self.timer_sequence += 1;
        self.timers.push(PendingTimer {
            due_at: self.last_poll + f64::from(ms) / 1000.0,
            callback,
            sequence: self.timer_sequence,
        });
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Record the clock time of a poll.
    pub fn observe_clock(&mut self, now: f64) {
        if now > self.last_poll {
            self.last_poll = now;
        }
    }

    /// Remove and return every timer due at `now`, in firing order.
    pub fn take_due_timers(&mut self, now: f64) -> Vec<PendingTimer> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due_at <= now);
        self.timers = pending;
        due.sort_by(|a, b| {
            a.due_at
                .total_cmp(&b.due_at)
                .then(a.sequence.cmp(&b.sequence))
        });
        due
    }

    /// Whether a tick should run at clock time `now`.
    pub fn tick_due(&self, now: f64) -> bool {
        self.is_running() && self.next_tick_at.is_none_or(|at| now >= at)
    }

    /// Book-keep a tick that ran at `now` and schedule the next one a full
    /// interval later.
    pub fn mark_ticked(&mut self, now: f64) {
        self.ticks += 1;
        self.next_tick_at = Some(now + f64::from(self.frame_ms) / 1000.0);
    }
}
