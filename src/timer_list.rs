//! The timer list and the duration draft it is fed from.
//!
//! [`TimerList`] is the only owner of timer state. The grid view never keeps
//! its own copy; every change goes through [`TimerList::apply`].

use std::fmt;

use tracing::info;

use crate::timer::{PausePolicy, TickOutcome, TimerEntry, TimerId};
use crate::validation::{validate_draft, DurationError};

/// One of the three fields of the duration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Hours,
    Minutes,
    Seconds,
}

impl DraftField {
    /// The field after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            DraftField::Hours => DraftField::Minutes,
            DraftField::Minutes => DraftField::Seconds,
            DraftField::Seconds => DraftField::Hours,
        }
    }

    /// The field before this one, wrapping around.
    pub fn previous(self) -> Self {
        match self {
            DraftField::Hours => DraftField::Seconds,
            DraftField::Minutes => DraftField::Hours,
            DraftField::Seconds => DraftField::Minutes,
        }
    }

    /// Short label shown above the input box.
    pub fn short_label(self) -> &'static str {
        match self {
            DraftField::Hours => "hr",
            DraftField::Minutes => "min",
            DraftField::Seconds => "sec",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftField::Hours => "Hours",
            DraftField::Minutes => "Minutes",
            DraftField::Seconds => "Seconds",
        };
        f.write_str(name)
    }
}

/// Unvalidated text of the duration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftInput {
    pub hrs: String,
    pub mins: String,
    pub secs: String,
}

impl DraftInput {
    pub fn new(hrs: impl Into<String>, mins: impl Into<String>, secs: impl Into<String>) -> Self {
        Self {
            hrs: hrs.into(),
            mins: mins.into(),
            secs: secs.into(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Hours => &self.hrs,
            DraftField::Minutes => &self.mins,
            DraftField::Seconds => &self.secs,
        }
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Hours => &mut self.hrs,
            DraftField::Minutes => &mut self.mins,
            DraftField::Seconds => &mut self.secs,
        }
    }
}

impl Default for DraftInput {
    fn default() -> Self {
        Self::new("00", "01", "00")
    }
}

/// A change requested for a timer in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMsg {
    /// Let every running timer whose tick is due recompute its remaining time
    Tick,
    /// Toggle pause on one timer
    PauseResume(TimerId),
    /// Remove one timer
    Delete(TimerId),
}

/// What applying a [`TimerMsg`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsgOutcome {
    /// Timers that expired during a tick
    Ticked { expired: Vec<TimerId> },
    Paused(TimerId),
    Resumed(TimerId),
    Deleted(TimerId),
    /// The message referred to a timer that cannot take it
    Ignored,
}

/// Ordered, owning collection of timers plus the form draft.
#[derive(Debug)]
pub struct TimerList {
    draft: DraftInput,
    entries: Vec<TimerEntry>,
    next_id: u64,
    pause_policy: PausePolicy,
}

impl TimerList {
    pub fn new(draft: DraftInput, pause_policy: PausePolicy) -> Self {
        Self {
            draft,
            entries: Vec::new(),
            next_id: 1,
            pause_policy,
        }
    }

    pub fn draft(&self) -> &DraftInput {
        &self.draft
    }

    pub fn entries(&self) -> &[TimerEntry] {
        &self.entries
    }

    pub fn get(&self, id: TimerId) -> Option<&TimerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pause_policy(&self) -> PausePolicy {
        self.pause_policy
    }

    /// Overwrites one field of the draft.
    pub fn update_draft_field(&mut self, field: DraftField, value: String) {
        *self.draft.field_mut(field) = value;
    }

    /// Appends a character to one field of the draft.
    pub fn push_char(&mut self, field: DraftField, c: char) {
        let mut value = self.draft.field(field).to_string();
        value.push(c);
        self.update_draft_field(field, value);
    }

    /// Removes the last character of one field of the draft.
    pub fn pop_char(&mut self, field: DraftField) {
        let mut value = self.draft.field(field).to_string();
        if value.pop().is_some() {
            self.update_draft_field(field, value);
        }
    }

    /// Turns the current draft into a new running timer.
    ///
    /// The draft is left as is whether or not this succeeds.
    pub fn submit_new_timer(&mut self, now_ms: i64) -> Result<TimerId, DurationError> {
        let id = TimerId(self.next_id);
        let entry = match validate_draft(&self.draft)
            .and_then(|duration_ms| TimerEntry::new(id, duration_ms, now_ms))
        {
            Ok(entry) => entry,
            Err(e) => {
                info!(error = %e, draft = ?self.draft, "timer rejected");
                return Err(e);
            }
        };

        self.next_id += 1;
        info!(timer = %id, duration_ms = entry.duration_ms, "timer created");
        self.entries.push(entry);
        Ok(id)
    }

    /// Applies a change to the list.
    pub fn apply(&mut self, msg: TimerMsg, now_ms: i64) -> MsgOutcome {
        match msg {
            TimerMsg::Tick => {
                let expired = self
                    .entries
                    .iter_mut()
                    .filter_map(|entry| match entry.advance(now_ms) {
                        Some(TickOutcome::Expired) => Some(entry.id),
                        _ => None,
                    })
                    .collect();
                MsgOutcome::Ticked { expired }
            }
            TimerMsg::PauseResume(id) => {
                let policy = self.pause_policy;
                let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
                    return MsgOutcome::Ignored;
                };
                if !entry.pause_resume(now_ms, policy) {
                    return MsgOutcome::Ignored;
                }
                if entry.is_running() {
                    MsgOutcome::Resumed(id)
                } else {
                    MsgOutcome::Paused(id)
                }
            }
            TimerMsg::Delete(id) => match self.entries.iter().position(|e| e.id == id) {
                Some(idx) => {
                    // Dropping the entry releases its ticker
                    self.entries.remove(idx);
                    info!(timer = %id, "timer deleted");
                    MsgOutcome::Deleted(id)
                }
                None => MsgOutcome::Ignored,
            },
        }
    }
}

impl Default for TimerList {
    fn default() -> Self {
        Self::new(DraftInput::default(), PausePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::progress::{format_duration_minutes, fraction_elapsed};
    use crate::timer::TimerStatus;

    const START: i64 = 1_700_000_000_000;

    fn list_with(hrs: &str, mins: &str, secs: &str) -> TimerList {
        TimerList::new(DraftInput::new(hrs, mins, secs), PausePolicy::Legacy)
    }

    #[test]
    fn test_default_draft_is_one_minute() {
        let list = TimerList::default();
        assert_eq!(list.draft(), &DraftInput::new("00", "01", "00"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_nine_seconds_is_rejected() {
        let mut list = list_with("00", "00", "09");
        let err = list.submit_new_timer(START).unwrap_err();
        assert_eq!(err.to_string(), "Timer must be at least 10 seconds");
        assert_eq!(list.len(), 0);
        assert_eq!(list.draft(), &DraftInput::new("00", "00", "09"));
    }

    #[test]
    fn test_all_zero_is_rejected() {
        let mut list = list_with("0", "0", "0");
        assert!(matches!(
            list.submit_new_timer(START),
            Err(DurationError::TooShort { ms: 0 })
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn test_ten_seconds_creates_timer() {
        let mut list = list_with("00", "00", "10");
        let id = list.submit_new_timer(START).unwrap();

        assert_eq!(list.len(), 1);
        let entry = list.get(id).unwrap();
        assert_eq!(entry.duration_ms, 10_000);
        assert_eq!(entry.time_left_ms, 10_000);
        assert_eq!(entry.end_at_ms - START, 10_000);
        assert!(entry.is_running());
    }

    #[test]
    fn test_one_hour_shows_sixty_mins() {
        let mut list = list_with("01", "00", "00");
        let id = list.submit_new_timer(START).unwrap();
        let entry = list.get(id).unwrap();

        assert_eq!(entry.duration_ms, 3_600_000);
        assert_eq!(format_duration_minutes(entry.duration_ms), "60 mins");
    }

    #[test]
    fn test_valid_totals_append_exactly_one() {
        let cases = [
            ("0", "0", "10", 10_000),
            ("0", "1", "0", 60_000),
            ("2", "30", "15", 9_015_000),
            ("0", "0", "600", 600_000),
        ];
        for (hrs, mins, secs, expected) in cases {
            let mut list = list_with(hrs, mins, secs);
            let id = list.submit_new_timer(START).unwrap();
            assert_eq!(list.len(), 1);
            let entry = list.get(id).unwrap();
            assert_eq!(entry.duration_ms, expected);
            assert_eq!(entry.end_at_ms - entry.created_at_ms, expected as i64);
        }
    }

    #[test]
    fn test_huge_totals_are_rejected_without_entry() {
        // Fits in u64 milliseconds but not in signed epoch time
        let mut list = list_with("5000000000000", "0", "0");
        assert_eq!(list.submit_new_timer(START), Err(DurationError::Overflow));
        assert!(list.is_empty());

        // Fits on its own, but the end time would pass i64::MAX
        let mut list = list_with("2562047788015", "0", "0");
        assert_eq!(list.submit_new_timer(START), Err(DurationError::Overflow));
        assert!(list.is_empty());

        // A rejected submission does not burn an id
        list.update_draft_field(DraftField::Hours, "1".to_string());
        assert_eq!(list.submit_new_timer(START), Ok(TimerId(1)));
    }

    #[test]
    fn test_long_total_keeps_end_time_invariant() {
        let mut list = list_with("1000000", "0", "0");
        let id = list.submit_new_timer(START).unwrap();
        let entry = list.get(id).unwrap();
        assert_eq!(entry.end_at_ms - entry.created_at_ms, entry.duration_ms as i64);
        assert!(entry.is_running());
    }

    #[test]
    fn test_non_numeric_is_rejected_without_entry() {
        let mut list = list_with("aa", "00", "30");
        assert!(matches!(
            list.submit_new_timer(START),
            Err(DurationError::NotANumber { field: DraftField::Hours, .. })
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut list = TimerList::default();
        let a = list.submit_new_timer(START).unwrap();
        let b = list.submit_new_timer(START).unwrap();
        let c = list.submit_new_timer(START + 5).unwrap();

        assert!(a < b && b < c);
        let order: Vec<TimerId> = list.entries().iter().map(|e| e.id).collect();
        assert_eq!(order, vec![a, b, c]);
        // Draft survives submission
        assert_eq!(list.draft(), &DraftInput::default());
    }

    #[test]
    fn test_draft_editing() {
        let mut list = TimerList::default();
        list.update_draft_field(DraftField::Seconds, "45".to_string());
        list.pop_char(DraftField::Minutes);
        list.push_char(DraftField::Minutes, '2');
        list.push_char(DraftField::Hours, '1');

        assert_eq!(list.draft(), &DraftInput::new("001", "02", "45"));

        // Backspace on an empty field leaves it empty
        list.update_draft_field(DraftField::Seconds, String::new());
        list.pop_char(DraftField::Seconds);
        assert_eq!(list.draft().secs, "");
    }

    #[test]
    fn test_tick_reports_expired_timers() {
        let clock = ManualClock::starting_at(START);
        let mut list = list_with("00", "00", "10");
        let short = list.submit_new_timer(clock.now_ms()).unwrap();
        list.update_draft_field(DraftField::Minutes, "05".to_string());
        let long = list.submit_new_timer(clock.now_ms()).unwrap();

        let mut expired = Vec::new();
        for _ in 0..10 {
            clock.advance(1_000);
            if let MsgOutcome::Ticked { expired: e } = list.apply(TimerMsg::Tick, clock.now_ms()) {
                expired.extend(e);
            }
        }

        assert_eq!(expired, vec![short]);
        let short_entry = list.get(short).unwrap();
        assert_eq!(short_entry.status(), TimerStatus::Expired);
        assert_eq!(short_entry.time_left_ms, 0);
        assert_eq!(fraction_elapsed(short_entry.time_left_ms, short_entry.duration_ms), 1.0);
        assert!(list.get(long).unwrap().is_running());
    }

    #[test]
    fn test_pause_resume_through_list() {
        let clock = ManualClock::starting_at(START);
        let mut list = TimerList::default();
        let id = list.submit_new_timer(clock.now_ms()).unwrap();
        let end_at = list.get(id).unwrap().end_at_ms;

        assert_eq!(list.apply(TimerMsg::PauseResume(id), clock.now_ms()), MsgOutcome::Paused(id));
        assert!(!list.get(id).unwrap().is_running());
        clock.advance(3_000);
        assert_eq!(list.apply(TimerMsg::PauseResume(id), clock.now_ms()), MsgOutcome::Resumed(id));
        assert!(list.get(id).unwrap().is_running());
        assert_eq!(list.get(id).unwrap().end_at_ms, end_at);
    }

    #[test]
    fn test_freeze_policy_through_list() {
        let clock = ManualClock::starting_at(START);
        let mut list = TimerList::new(DraftInput::default(), PausePolicy::Freeze);
        let id = list.submit_new_timer(clock.now_ms()).unwrap();

        list.apply(TimerMsg::PauseResume(id), clock.now_ms());
        clock.advance(3_000);
        list.apply(TimerMsg::PauseResume(id), clock.now_ms());
        assert_eq!(list.get(id).unwrap().end_at_ms, START + 63_000);
    }

    #[test]
    fn test_delete_removes_only_that_timer() {
        let mut list = TimerList::default();
        let a = list.submit_new_timer(START).unwrap();
        let b = list.submit_new_timer(START).unwrap();

        assert_eq!(list.apply(TimerMsg::Delete(a), START), MsgOutcome::Deleted(a));
        assert_eq!(list.len(), 1);
        assert!(list.get(a).is_none());
        assert!(list.get(b).is_some());

        assert_eq!(list.apply(TimerMsg::Delete(a), START), MsgOutcome::Ignored);
    }

    #[test]
    fn test_unknown_or_expired_pause_is_ignored() {
        let clock = ManualClock::starting_at(START);
        let mut list = list_with("00", "00", "10");
        let id = list.submit_new_timer(clock.now_ms()).unwrap();

        assert_eq!(list.apply(TimerMsg::PauseResume(TimerId(99)), clock.now_ms()), MsgOutcome::Ignored);

        clock.advance(10_000);
        list.apply(TimerMsg::Tick, clock.now_ms());
        assert_eq!(list.apply(TimerMsg::PauseResume(id), clock.now_ms()), MsgOutcome::Ignored);
    }
}
