//! Progress ring geometry and time formatting.

use std::f64::consts::PI;

use crate::constants::ring::RADIUS;
use crate::constants::timing::{MS_PER_MINUTE, MS_PER_SECOND};

/// Circumference of the progress ring.
pub fn circumference() -> f64 {
    2.0 * PI * RADIUS
}

/// Fraction of the configured duration that has elapsed.
///
/// 0.0 for a fresh timer, 1.0 once it has expired.
pub fn fraction_elapsed(time_left_ms: u64, duration_ms: u64) -> f64 {
    1.0 - time_left_ms as f64 / duration_ms as f64
}

/// Stroke offset of the foreground ring; 0 is a full ring.
pub fn dash_offset(time_left_ms: u64, duration_ms: u64) -> f64 {
    circumference() * fraction_elapsed(time_left_ms, duration_ms)
}

/// Points along the foreground arc, centred on the origin.
///
/// The arc starts at 12 o'clock and runs clockwise over the remaining
/// fraction of the ring. Returns nothing once the timer has run out.
pub fn arc_points(time_left_ms: u64, duration_ms: u64, steps: usize) -> Vec<(f64, f64)> {
    let visible = circumference() - dash_offset(time_left_ms, duration_ms);
    if visible <= 0.0 || steps == 0 {
        return Vec::new();
    }

    let sweep = 2.0 * PI * (visible / circumference());
    let count = ((steps as f64) * sweep / (2.0 * PI)).ceil().max(1.0) as usize;

    (0..=count)
        .map(|i| {
            let theta = PI / 2.0 - sweep * (i as f64 / count as f64);
            (RADIUS * theta.cos(), RADIUS * theta.sin())
        })
        .collect()
}

/// Formats milliseconds as zero-padded `HH:MM:SS`.
pub fn format_hms(ms: u64) -> String {
    let total_seconds = ms / MS_PER_SECOND;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Configured duration in whole minutes, e.g. `60 mins`.
pub fn format_duration_minutes(duration_ms: u64) -> String {
    format!("{} mins", duration_ms / MS_PER_MINUTE)
}
