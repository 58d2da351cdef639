//! Clock abstraction used by status reporting.
//!
//! Reports need two notions of time: the monotonic uptime of the running
//! image, and (if it has been set by network or GPS) the wall clock.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Source of uptime and wall-clock time.
pub trait Clock {
    /// Seconds elapsed since this image booted.
    fn uptime_secs(&self) -> u32;

    /// Current Unix time in seconds, or `None` while the wall clock is unset.
    fn unix_time(&self) -> Option<i64>;

    /// Unix time at which this image booted, if the wall clock is set.
    fn boot_unix_time(&self) -> Option<i64> {
        self.unix_time()
            .map(|now| now - i64::from(self.uptime_secs()))
            .filter(|t| *t > 0)
    }
}

/// Controllable clock for tests.
///
/// Atomics keep it `Sync` so it can sit inside `'static` test fixtures.
///
/// ```
/// use bootdiag_core::traits::{Clock, MockClock};
///
/// let clock = MockClock::new();
/// clock.advance(90);
/// assert_eq!(clock.uptime_secs(), 90);
/// assert_eq!(clock.unix_time(), None);
/// ```
#[derive(Default)]
pub struct MockClock {
    uptime: AtomicU32,
    unix: AtomicU32,
    unix_set: AtomicBool,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances uptime and, if set, the wall clock.
    pub fn advance(&self, secs: u32) {
        self.uptime.fetch_add(secs, Ordering::Relaxed);
        self.unix.fetch_add(secs, Ordering::Relaxed);
    }

    pub fn set_unix_time(&self, now: u32) {
        self.unix.store(now, Ordering::Relaxed);
        self.unix_set.store(true, Ordering::Relaxed);
    }
}

impl Clock for MockClock {
    fn uptime_secs(&self) -> u32 {
        self.uptime.load(Ordering::Relaxed)
    }

    fn unix_time(&self) -> Option<i64> {
        self.unix_set
            .load(Ordering::Relaxed)
            .then(|| i64::from(self.unix.load(Ordering::Relaxed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_time_unknown_without_wall_clock() {
        let clock = MockClock::new();
        clock.advance(10);
        assert_eq!(clock.boot_unix_time(), None);
    }

    #[test]
    fn test_boot_time_derived_from_uptime() {
        let clock = MockClock::new();
        clock.advance(100);
        clock.set_unix_time(1_700_000_000);
        assert_eq!(clock.boot_unix_time(), Some(1_700_000_000 - 100));

        clock.advance(20);
        assert_eq!(clock.boot_unix_time(), Some(1_700_000_000 - 100));
    }

    #[test]
    fn test_boot_time_before_epoch_is_hidden() {
        let clock = MockClock::new();
        clock.advance(50);
        clock.set_unix_time(30);
        assert_eq!(clock.boot_unix_time(), None);
    }
}
