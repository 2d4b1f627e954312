//! Time sources for record and span timestamps.
//!
//! Timestamps are nanoseconds since the Unix epoch. The default
//! [`SystemClock`] anchors a monotonic [`Instant`] against the system time
//! once at construction, so timestamps are comparable to epoch time while
//! staying non-decreasing within a process even if the wall clock steps.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A timestamp with nanosecond resolution, relative to the Unix epoch.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// The timestamp as nanoseconds.
    pub fn as_nanos(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A source of timestamps.
///
/// Implementations must be monotonic within a process: two `now` calls made
/// in order on the same thread never go backwards.
pub trait Clock: fmt::Debug + Send + Sync {
    /// The current time.
    fn now(&self) -> Timestamp;
}

/// The default clock: epoch-anchored monotonic time.
///
/// The offset between [`Instant`] and [`SystemTime`] is sampled once at
/// construction; afterwards only the monotonic clock is read.
#[derive(Debug)]
pub struct SystemClock {
    epoch_nanos_at_anchor: u64,
    anchor: Instant,
}

impl SystemClock {
    /// Creates a clock anchored at the current moment.
    pub fn new() -> Self {
        let anchor = Instant::now();
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        Self {
            epoch_nanos_at_anchor: since_epoch.as_micros() as u64 * 1000,
            anchor,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let elapsed_nanos = self.anchor.elapsed().as_micros() as u64 * 1000;
        Timestamp(self.epoch_nanos_at_anchor + elapsed_nanos)
    }
}

/// A clock that only moves when told to, for tests.
///
/// # Examples
///
/// ```rust
/// use tasklane_telemetry::{Clock, ManualClock, Timestamp};
///
/// let clock = ManualClock::new(Timestamp(10));
/// clock.advance(5);
/// assert_eq!(clock.now(), Timestamp(15));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    /// Creates a clock starting at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            nanos: AtomicU64::new(start.0),
        }
    }

    /// Moves the clock forward by `nanos` nanoseconds.
    pub fn advance(&self, nanos: u64) {
        self.nanos.fetch_add(nanos, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.nanos.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_non_decreasing() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn system_clock_is_near_epoch_time() {
        let clock = SystemClock::new();
        let now = clock.now().as_nanos();
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        // Within ten seconds of the wall clock.
        assert!(now.abs_diff(wall) < 10_000_000_000);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(Timestamp(100));
        assert_eq!(clock.now(), Timestamp(100));
        clock.advance(11);
        assert_eq!(clock.now(), Timestamp(111));
    }
}
