//! Clock abstraction for server-assigned timestamps.
//!
//! Production code uses [`SystemClock`]; tests that assert on timestamp
//! boundaries (e.g. reading messages since a point in time) inject a
//! [`MockClock`] and advance it explicitly.

use std::ops::Add;
use std::sync::RwLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;

    /// Current time as milliseconds since the Unix epoch.
    ///
    /// This is the resolution at which the bus assigns message timestamps.
    fn now_millis(&self) -> i64 {
        self.now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// The real system clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A manually controlled clock for tests.
#[derive(Debug)]
pub struct MockClock {
    now: RwLock<SystemTime>,
}

impl Clock for MockClock {
    fn now(&self) -> SystemTime {
        *self.now.read().unwrap()
    }
}

impl MockClock {
    pub fn with_time(time: SystemTime) -> Self {
        Self {
            now: RwLock::new(time),
        }
    }

    pub fn new() -> Self {
        Self::with_time(SystemTime::now())
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.write().unwrap();
        *now = now.add(duration);
    }

    pub fn set_time(&self, time: SystemTime) {
        *self.now.write().unwrap() = time;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_advance_mock_clock() {
        // given
        let start = UNIX_EPOCH + Duration::from_millis(1_700_000_000_000);
        let clock = MockClock::with_time(start);

        // when
        clock.advance(Duration::from_millis(250));

        // then
        assert_eq!(clock.now_millis(), 1_700_000_000_250);
    }

    #[test]
    fn should_set_mock_clock_time() {
        // given
        let clock = MockClock::new();

        // when
        clock.set_time(UNIX_EPOCH + Duration::from_secs(42));

        // then
        assert_eq!(clock.now_millis(), 42_000);
    }

    #[test]
    fn should_report_millis_from_system_clock() {
        // then - a sane lower bound (after 2020-01-01)
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
