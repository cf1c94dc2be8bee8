//! Time sources
//!
//! The engine never reads the wall clock itself; callers pass `now` into
//! [`crate::Game::tick`] and [`crate::Game::apply_action`]. The binary uses
//! [`MonotonicClock`]; tests and benches step a [`ManualClock`] by hand.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

/// `Instant::now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move forward by `by` and return the new time
    pub fn advance(&self, by: Duration) -> Instant {
        let next = self.now.get() + by;
        self.now.set(next);
        next
    }

    pub fn advance_ms(&self, ms: u64) -> Instant {
        self.advance(Duration::from_millis(ms))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
