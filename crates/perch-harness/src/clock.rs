#![forbid(unsafe_code)]

//! Host-controlled monotonic clock.

use std::time::Duration;

/// Monotonic clock that only moves when told to.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    /// Create a clock at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current time. Moving backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance by `dt` and return the new time.
    pub fn advance(&mut self, dt: Duration) -> Duration {
        self.now = self.now.saturating_add(dt);
        self.now
    }

    /// Advance by `ms` milliseconds and return the new time.
    pub fn advance_ms(&mut self, ms: u64) -> Duration {
        self.advance(Duration::from_millis(ms))
    }
}
