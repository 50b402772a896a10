//! Monotonic time sources.
//!
//! The engine never reads the system clock on its own: every command takes
//! an explicit `now`, and the drivers obtain it from a [`Clock`]. Tests and
//! simulations use [`ManualClock`] to move time forward without sleeping.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Supplies "now" as a monotonic instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Real monotonic time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Starts at the instant it was created and advances by explicit steps.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Moves the clock forward and returns the new "now".
    pub fn advance(&self, step: Duration) -> Instant {
        let mut offset = self.offset.lock();
        *offset += step;
        self.origin + *offset
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock()
    }
}
