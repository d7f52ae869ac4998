//! Application-wide constants.
//!
//! Centralizes magic numbers and configuration values for maintainability.

use std::time::Duration;

/// Event polling timeout - balances responsiveness with CPU usage.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Timer behaviour.
pub mod timing {
    /// Period of a running timer's tick, in milliseconds.
    pub const TICK_PERIOD_MS: i64 = 1_000;
    /// Shortest duration a new timer may have, in milliseconds.
    pub const MIN_DURATION_MS: u64 = 10_000;
    /// Milliseconds per hour.
    pub const MS_PER_HOUR: u64 = 3_600_000;
    /// Milliseconds per minute.
    pub const MS_PER_MINUTE: u64 = 60_000;
    /// Milliseconds per second.
    pub const MS_PER_SECOND: u64 = 1_000;
}

/// Progress ring geometry.
pub mod ring {
    /// Radius of the ring, in canvas units.
    pub const RADIUS: f64 = 89.1;
    /// Half the side of the square canvas the ring is drawn in.
    pub const CANVAS_HALF_EXTENT: f64 = 99.0;
    /// Number of points used to draw the foreground arc.
    pub const ARC_STEPS: usize = 360;
}

/// Layout dimensions for the main UI structure.
pub mod layout {
    /// Header height.
    pub const HEADER_HEIGHT: u16 = 3;
    /// Duration form height.
    pub const FORM_HEIGHT: u16 = 5;
    /// Commands bar height.
    pub const COMMANDS_BAR_HEIGHT: u16 = 2;
    /// Status bar height.
    pub const STATUS_BAR_HEIGHT: u16 = 1;
    /// Height of one timer card.
    pub const CARD_HEIGHT: u16 = 14;
    /// Terminal width from which the grid switches to two columns.
    pub const WIDE_BREAKPOINT: u16 = 100;
}

/// Dialog dimensions (percentages of screen size).
pub mod dialog {
    /// Help overlay width percentage.
    pub const HELP_WIDTH: u16 = 60;
    /// Help overlay height percentage.
    pub const HELP_HEIGHT: u16 = 70;
    /// Alert dialog width percentage.
    pub const ALERT_WIDTH: u16 = 50;
    /// Alert dialog height percentage.
    pub const ALERT_HEIGHT: u16 = 25;
    /// Confirm dialog width percentage.
    pub const CONFIRM_WIDTH: u16 = 50;
    /// Confirm dialog height percentage.
    pub const CONFIRM_HEIGHT: u16 = 30;
}
