//! Input validation for the duration form.
//!
//! Each free-text field is parsed into a non-negative whole number before any
//! arithmetic happens. A field that fails to parse aborts the submission with
//! its own error; only a fully parsed total is checked against the minimum.

use thiserror::Error;

use crate::constants::timing::{MIN_DURATION_MS, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
use crate::timer_list::{DraftField, DraftInput};

/// Why a draft could not become a timer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("{field} cannot be empty")]
    Empty { field: DraftField },

    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: DraftField, value: String },

    #[error("{field} cannot be negative, got '{value}'")]
    Negative { field: DraftField, value: String },

    #[error("Timer duration is too large")]
    Overflow,

    #[error("Timer must be at least 10 seconds")]
    TooShort { ms: u64 },
}

/// Validation result carrying the total duration in milliseconds.
pub type ValidationResult = Result<u64, DurationError>;

/// Parses one field as a base-10 whole number.
///
/// Surrounding whitespace is ignored. A leading `+` is accepted; a leading
/// `-` is reported as negative rather than as garbage.
pub fn parse_field(field: DraftField, raw: &str) -> Result<u64, DurationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DurationError::Empty { field });
    }

    if let Some(rest) = trimmed.strip_prefix('-') {
        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(DurationError::Negative {
                field,
                value: trimmed.to_string(),
            });
        }
    }

    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DurationError::NotANumber {
            field,
            value: trimmed.to_string(),
        });
    }

    // All-digit input only fails to parse when it does not fit
    digits.parse::<u64>().map_err(|_| DurationError::Overflow)
}

/// Combines hours, minutes and seconds into milliseconds.
pub fn total_ms(hrs: u64, mins: u64, secs: u64) -> Result<u64, DurationError> {
    let h = hrs.checked_mul(MS_PER_HOUR);
    let m = mins.checked_mul(MS_PER_MINUTE);
    let s = secs.checked_mul(MS_PER_SECOND);

    match (h, m, s) {
        (Some(h), Some(m), Some(s)) => h
            .checked_add(m)
            .and_then(|hm| hm.checked_add(s))
            .ok_or(DurationError::Overflow),
        _ => Err(DurationError::Overflow),
    }
}

/// Validates a whole draft and returns the duration it describes.
pub fn validate_draft(draft: &DraftInput) -> ValidationResult {
    let hrs = parse_field(DraftField::Hours, &draft.hrs)?;
    let mins = parse_field(DraftField::Minutes, &draft.mins)?;
    let secs = parse_field(DraftField::Seconds, &draft.secs)?;

    let ms = total_ms(hrs, mins, secs)?;
    if ms < MIN_DURATION_MS {
        return Err(DurationError::TooShort { ms });
    }

    // Durations are added to epoch milliseconds, which are signed
    if i64::try_from(ms).is_err() {
        return Err(DurationError::Overflow);
    }

    Ok(ms)
}

/// Epoch milliseconds at which a countdown of `duration_ms` started at
/// `now_ms` reaches zero.
pub fn end_timestamp(now_ms: i64, duration_ms: u64) -> Result<i64, DurationError> {
    i64::try_from(duration_ms)
        .ok()
        .and_then(|ms| now_ms.checked_add(ms))
        .ok_or(DurationError::Overflow)
}
