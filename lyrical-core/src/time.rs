//! Millisecond conversion and formatting helpers.

use std::time::Duration;

/// Extension trait for saturating Duration conversions.
pub trait DurationExt {
    /// Convert duration to milliseconds as i64, saturating at `i64::MAX`.
    ///
    /// Track positions are signed so cue shifts below zero stay representable.
    fn as_millis_i64(&self) -> i64;
}

impl DurationExt for Duration {
    fn as_millis_i64(&self) -> i64 {
        i64::try_from(self.as_millis()).unwrap_or(i64::MAX)
    }
}

/// Format a track position as seconds with millisecond precision (`"12.345"`)
#[must_use]
pub fn format_seconds(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let abs = ms.unsigned_abs();
    format!("{sign}{}.{:03}", abs / 1000, abs % 1000)
}

/// Format a track position as `m:ss.mmm`
#[must_use]
pub fn format_clock(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let abs = ms.unsigned_abs();
    let minutes = abs / 60_000;
    let seconds = (abs / 1000) % 60;
    format!("{sign}{minutes}:{seconds:02}.{:03}", abs % 1000)
}
