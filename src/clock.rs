//! Wall-clock source.
//!
//! Timers store absolute end times in epoch milliseconds, so everything that
//! needs "now" goes through [`Clock`]. Tests drive a [`ManualClock`] instead.

/// Source of the current wall-clock time.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Reads the system clock via chrono.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: std::cell::Cell<i64>,
}

#[cfg(test)]
impl ManualClock {
    pub fn starting_at(now_ms: i64) -> Self {
        Self {
            now: std::cell::Cell::new(now_ms),
        }
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::starting_at(1_000);
        clock.advance(500);
        assert_eq!(clock.now_ms(), 1_500);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
