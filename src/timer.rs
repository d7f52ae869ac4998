//! Countdown state for a single timer.
//!
//! A running timer owns a [`Ticker`] that fires once per second. Every fire
//! recomputes the remaining time from the fixed end timestamp, so late or
//! skipped frames never make the countdown drift.

use std::fmt;

use clap::ValueEnum;
use tracing::{debug, info, trace, warn};

use crate::constants::timing::TICK_PERIOD_MS;
use crate::validation::{end_timestamp, DurationError};

/// Identifier of a timer, unique for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Run state of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    /// Counting down
    Running,
    /// Stopped by the user; the display is stale until resumed
    Paused,
    /// Reached zero. Terminal.
    Expired,
}

impl TimerStatus {
    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Expired => "done",
        }
    }
}

/// What happens to the end timestamp when a paused timer resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PausePolicy {
    /// Keep the original end time; time keeps running while paused.
    #[default]
    Legacy,
    /// Push the end time out by the paused interval.
    Freeze,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Remaining time refreshed
    Updated,
    /// The timer just reached zero
    Expired,
}

/// A repeating one-second callback slot.
///
/// Exists only while its timer is running; dropping it cancels the tick.
#[derive(Debug)]
pub struct Ticker {
    owner: TimerId,
    period_ms: i64,
    next_fire_ms: i64,
}

impl Ticker {
    /// Starts a ticker whose first fire is one period from `now_ms`.
    pub fn start(owner: TimerId, now_ms: i64) -> Self {
        trace!(timer = %owner, "ticker started");
        Self {
            owner,
            period_ms: TICK_PERIOD_MS,
            next_fire_ms: now_ms + TICK_PERIOD_MS,
        }
    }

    /// Returns true if the ticker is due at `now_ms`, and schedules the next fire.
    ///
    /// Missed periods are not replayed; a late fire reschedules one period out.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        if now_ms < self.next_fire_ms {
            return false;
        }
        self.next_fire_ms += self.period_ms;
        if self.next_fire_ms <= now_ms {
            self.next_fire_ms = now_ms + self.period_ms;
        }
        true
    }

    #[cfg(test)]
    pub fn next_fire_ms(&self) -> i64 {
        self.next_fire_ms
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        trace!(timer = %self.owner, "ticker released");
    }
}

/// One configured countdown.
#[derive(Debug)]
pub struct TimerEntry {
    pub id: TimerId,
    /// Configured total, in milliseconds
    pub duration_ms: u64,
    /// Remaining time as of the last tick (or pause)
    pub time_left_ms: u64,
    /// Epoch milliseconds at which the timer reaches zero
    pub end_at_ms: i64,
    /// Epoch milliseconds at which the timer was added
    pub created_at_ms: i64,
    status: TimerStatus,
    ticker: Option<Ticker>,
}

impl TimerEntry {
    /// Creates a running timer that ends `duration_ms` after `now_ms`.
    ///
    /// Fails if the end timestamp does not fit in epoch milliseconds.
    pub fn new(id: TimerId, duration_ms: u64, now_ms: i64) -> Result<Self, DurationError> {
        let end_at_ms = end_timestamp(now_ms, duration_ms)?;
        Ok(Self {
            id,
            duration_ms,
            time_left_ms: duration_ms,
            end_at_ms,
            created_at_ms: now_ms,
            status: TimerStatus::Running,
            ticker: Some(Ticker::start(id, now_ms)),
        })
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Whether a tick resource is currently held.
    #[cfg(test)]
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    /// Remaining time derived from the end timestamp, ignoring the run state.
    pub fn remaining_at(&self, now_ms: i64) -> i64 {
        self.end_at_ms - now_ms
    }

    /// Advances the timer to `now_ms`, ticking if its ticker is due.
    pub fn advance(&mut self, now_ms: i64) -> Option<TickOutcome> {
        let due = match self.ticker.as_mut() {
            Some(ticker) => ticker.poll(now_ms),
            None => false,
        };
        if due {
            Some(self.tick(now_ms))
        } else {
            None
        }
    }

    /// Recomputes the remaining time from the end timestamp.
    fn tick(&mut self, now_ms: i64) -> TickOutcome {
        let remaining = self.remaining_at(now_ms);
        if remaining <= 0 {
            self.ticker = None;
            self.time_left_ms = 0;
            self.status = TimerStatus::Expired;
            info!(timer = %self.id, duration_ms = self.duration_ms, "timer expired");
            TickOutcome::Expired
        } else {
            self.time_left_ms = remaining as u64;
            TickOutcome::Updated
        }
    }

    /// Toggles between running and paused.
    ///
    /// Returns false if the timer has expired, or if a frozen resume would push
    /// the end time out of range; nothing changes in either case.
    pub fn pause_resume(&mut self, now_ms: i64, policy: PausePolicy) -> bool {
        match self.status {
            TimerStatus::Running => {
                self.ticker = None;
                self.status = TimerStatus::Paused;
                debug!(timer = %self.id, time_left_ms = self.time_left_ms, "timer paused");
                true
            }
            TimerStatus::Paused => {
                if policy == PausePolicy::Freeze {
                    match end_timestamp(now_ms, self.time_left_ms) {
                        Ok(end_at_ms) => self.end_at_ms = end_at_ms,
                        Err(e) => {
                            warn!(timer = %self.id, error = %e, "cannot resume timer");
                            return false;
                        }
                    }
                }
                self.ticker = Some(Ticker::start(self.id, now_ms));
                self.status = TimerStatus::Running;
                debug!(timer = %self.id, end_at_ms = self.end_at_ms, ?policy, "timer resumed");
                true
            }
            TimerStatus::Expired => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};

    const START: i64 = 1_700_000_000_000;

    /// Steps the clock one second at a time, advancing the timer each step.
    fn run_for(entry: &mut TimerEntry, clock: &ManualClock, seconds: i64) {
        for _ in 0..seconds {
            clock.advance(1_000);
            entry.advance(clock.now_ms());
        }
    }

    #[test]
    fn test_new_timer_is_running() {
        let entry = TimerEntry::new(TimerId(1), 60_000, START).unwrap();
        assert_eq!(entry.status(), TimerStatus::Running);
        assert_eq!(entry.time_left_ms, 60_000);
        assert_eq!(entry.end_at_ms - entry.created_at_ms, 60_000);
        assert!(entry.has_ticker());
    }

    #[test]
    fn test_ticker_fires_once_per_period() {
        let mut ticker = Ticker::start(TimerId(1), 0);
        assert!(!ticker.poll(999));
        assert!(ticker.poll(1_000));
        assert!(!ticker.poll(1_500));
        assert!(ticker.poll(2_000));
        assert_eq!(ticker.next_fire_ms(), 3_000);
    }

    #[test]
    fn test_late_ticker_does_not_burst() {
        let mut ticker = Ticker::start(TimerId(1), 0);
        assert!(ticker.poll(5_300));
        assert!(!ticker.poll(5_400));
        assert_eq!(ticker.next_fire_ms(), 6_300);
    }

    #[test]
    fn test_tick_recomputes_from_end_time() {
        let clock = ManualClock::starting_at(START);
        let mut entry = TimerEntry::new(TimerId(1), 60_000, clock.now_ms()).unwrap();

        clock.advance(1_250);
        assert_eq!(entry.advance(clock.now_ms()), Some(TickOutcome::Updated));
        assert_eq!(entry.time_left_ms, 58_750);
    }

    #[test]
    fn test_ten_second_timer_expires() {
        let clock = ManualClock::starting_at(START);
        let mut entry = TimerEntry::new(TimerId(1), 10_000, clock.now_ms()).unwrap();

        run_for(&mut entry, &clock, 9);
        assert!(entry.is_running());
        assert_eq!(entry.time_left_ms, 1_000);

        run_for(&mut entry, &clock, 1);
        assert!(!entry.is_running());
        assert_eq!(entry.status(), TimerStatus::Expired);
        assert_eq!(entry.time_left_ms, 0);
        assert!(!entry.has_ticker());

        // No further ticks once expired
        run_for(&mut entry, &clock, 5);
        assert_eq!(entry.advance(clock.now_ms()), None);
        assert_eq!(entry.time_left_ms, 0);
    }

    #[test]
    fn test_pause_cancels_ticker() {
        let clock = ManualClock::starting_at(START);
        let mut entry = TimerEntry::new(TimerId(1), 60_000, clock.now_ms()).unwrap();

        run_for(&mut entry, &clock, 3);
        assert!(entry.pause_resume(clock.now_ms(), PausePolicy::Legacy));
        assert_eq!(entry.status(), TimerStatus::Paused);
        assert!(!entry.has_ticker());

        // Display stays stale while paused
        run_for(&mut entry, &clock, 10);
        assert_eq!(entry.time_left_ms, 57_000);
    }

    #[test]
    fn test_double_toggle_restores_state_and_end_time() {
        let clock = ManualClock::starting_at(START);
        let mut entry = TimerEntry::new(TimerId(1), 60_000, clock.now_ms()).unwrap();
        let end_at = entry.end_at_ms;

        entry.pause_resume(clock.now_ms(), PausePolicy::Legacy);
        assert!(!entry.is_running());
        entry.pause_resume(clock.now_ms(), PausePolicy::Legacy);
        assert!(entry.is_running());
        assert_eq!(entry.end_at_ms, end_at);
    }

    #[test]
    fn test_legacy_resume_catches_up() {
        let clock = ManualClock::starting_at(START);
        let mut paused = TimerEntry::new(TimerId(1), 60_000, clock.now_ms()).unwrap();
        let mut untouched = TimerEntry::new(TimerId(2), 60_000, clock.now_ms()).unwrap();

        run_for(&mut paused, &clock, 5);
        paused.pause_resume(clock.now_ms(), PausePolicy::Legacy);
        clock.advance(20_000);
        paused.pause_resume(clock.now_ms(), PausePolicy::Legacy);
        clock.advance(1_000);
        paused.advance(clock.now_ms());
        untouched.advance(clock.now_ms());

        assert_eq!(paused.end_at_ms, untouched.end_at_ms);
        assert_eq!(paused.time_left_ms, untouched.time_left_ms);
        assert_eq!(paused.time_left_ms, 34_000);
    }

    #[test]
    fn test_legacy_resume_after_end_time_expires_on_next_tick() {
        let clock = ManualClock::starting_at(START);
        let mut entry = TimerEntry::new(TimerId(1), 10_000, clock.now_ms()).unwrap();

        entry.pause_resume(clock.now_ms(), PausePolicy::Legacy);
        clock.advance(30_000);
        entry.pause_resume(clock.now_ms(), PausePolicy::Legacy);
        assert_eq!(entry.time_left_ms, 10_000);

        run_for(&mut entry, &clock, 1);
        assert_eq!(entry.status(), TimerStatus::Expired);
    }

    #[test]
    fn test_freeze_resume_extends_end_time() {
        let clock = ManualClock::starting_at(START);
        let mut entry = TimerEntry::new(TimerId(1), 60_000, clock.now_ms()).unwrap();

        run_for(&mut entry, &clock, 5);
        entry.pause_resume(clock.now_ms(), PausePolicy::Freeze);
        clock.advance(20_000);
        entry.pause_resume(clock.now_ms(), PausePolicy::Freeze);
        assert_eq!(entry.end_at_ms, clock.now_ms() + 55_000);

        run_for(&mut entry, &clock, 1);
        assert_eq!(entry.time_left_ms, 54_000);
    }

    #[test]
    fn test_new_rejects_end_time_out_of_range() {
        assert_eq!(
            TimerEntry::new(TimerId(1), i64::MAX as u64, START).unwrap_err(),
            DurationError::Overflow
        );
        assert!(TimerEntry::new(TimerId(1), u64::MAX, START).is_err());
    }

    #[test]
    fn test_freeze_resume_out_of_range_stays_paused() {
        let clock = ManualClock::starting_at(START);
        let duration_ms = (i64::MAX - START) as u64;
        let mut entry = TimerEntry::new(TimerId(1), duration_ms, clock.now_ms()).unwrap();
        assert_eq!(entry.end_at_ms, i64::MAX);

        entry.pause_resume(clock.now_ms(), PausePolicy::Freeze);
        clock.advance(1_000);
        assert!(!entry.pause_resume(clock.now_ms(), PausePolicy::Freeze));
        assert_eq!(entry.status(), TimerStatus::Paused);
        assert_eq!(entry.end_at_ms, i64::MAX);
        assert!(!entry.has_ticker());
    }

    #[test]
    fn test_expired_ignores_pause_resume() {
        let clock = ManualClock::starting_at(START);
        let mut entry = TimerEntry::new(TimerId(1), 10_000, clock.now_ms()).unwrap();
        run_for(&mut entry, &clock, 10);

        assert!(!entry.pause_resume(clock.now_ms(), PausePolicy::Legacy));
        assert_eq!(entry.status(), TimerStatus::Expired);
        assert!(!entry.has_ticker());
    }
}
