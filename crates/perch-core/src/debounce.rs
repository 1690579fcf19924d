#![forbid(unsafe_code)]

//! Trailing-edge debouncing.
//!
//! A [`Debouncer`] collapses a burst of calls into the last one, delivered
//! once the burst has been quiet for `delay`. It is not fire-and-collect:
//! intermediate values are dropped and only the final value is released.
//!
//! Time is a monotonic timestamp supplied by the caller. The debouncer never
//! reads a clock itself, so identical call sequences yield identical results.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use perch_core::debounce::Debouncer;
//!
//! let mut visibility = Debouncer::new(Duration::from_millis(300));
//! visibility.call(true, Duration::from_millis(0));
//! visibility.call(false, Duration::from_millis(120));
//!
//! // Still inside the quiet window measured from the last call.
//! assert_eq!(visibility.poll(Duration::from_millis(400)), None);
//! assert_eq!(visibility.poll(Duration::from_millis(420)), Some(false));
//! assert_eq!(visibility.poll(Duration::from_millis(900)), None);
//! ```
//!
//! # Invariants
//!
//! - **Latest-wins**: the value released is the one passed to the last `call`.
//! - **Single release**: each burst releases at most once.
//! - **Zero delay**: a zero `delay` releases on the next `poll`, which is how
//!   "defer to the next tick" is expressed.

use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Duration,
}

/// Collapses rapid calls into one trailing invocation.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
    /// Diagnostic: calls superseded by a later call.
    dropped: u64,
    /// Diagnostic: values released.
    released: u64,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            dropped: 0,
            released: 0,
        }
    }

    /// Submit a value, restarting the quiet window at `now`.
    pub fn call(&mut self, value: T, now: Duration) {
        if self.pending.is_some() {
            self.dropped += 1;
        }
        self.pending = Some(Pending {
            value,
            deadline: now.saturating_add(self.delay),
        });
    }

    /// Release the pending value if its quiet window has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if !due {
            return None;
        }
        self.released += 1;
        self.pending.take().map(|pending| pending.value)
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Whether a value is waiting for its window to elapse.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Number of calls superseded before release (diagnostic).
    #[inline]
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    /// Number of values released (diagnostic).
    #[inline]
    #[must_use]
    pub fn released_count(&self) -> u64 {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn releases_after_quiet_window() {
        let mut d = Debouncer::new(ms(150));
        d.call("hide", ms(10));
        assert_eq!(d.poll(ms(159)), None);
        assert_eq!(d.poll(ms(160)), Some("hide"));
        assert!(!d.is_pending());
    }

    #[test]
    fn burst_collapses_to_last_value() {
        let mut d = Debouncer::new(ms(300));
        d.call(1, ms(0));
        d.call(2, ms(100));
        d.call(3, ms(250));
        assert_eq!(d.poll(ms(500)), None);
        assert_eq!(d.poll(ms(550)), Some(3));
        assert_eq!(d.dropped_count(), 2);
        assert_eq!(d.released_count(), 1);
    }

    #[test]
    fn each_burst_releases_once() {
        let mut d = Debouncer::new(ms(50));
        d.call((), ms(0));
        assert!(d.poll(ms(60)).is_some());
        assert!(d.poll(ms(70)).is_none());
        d.call((), ms(100));
        assert!(d.poll(ms(150)).is_some());
        assert_eq!(d.released_count(), 2);
    }

    #[test]
    fn cancel_discards_without_release() {
        let mut d = Debouncer::new(ms(50));
        d.call(7, ms(0));
        assert_eq!(d.cancel(), Some(7));
        assert_eq!(d.poll(ms(1000)), None);
        assert_eq!(d.released_count(), 0);
    }

    #[test]
    fn zero_delay_releases_on_next_poll() {
        let mut d = Debouncer::new(Duration::ZERO);
        d.call(true, ms(42));
        assert_eq!(d.deadline(), Some(ms(42)));
        assert_eq!(d.poll(ms(42)), Some(true));
    }
}
