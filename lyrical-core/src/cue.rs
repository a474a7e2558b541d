//! Timed lyric spans.

use std::fmt;

/// Which time point of a cue a shift applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShiftMode {
    /// Move only the begin point
    Begin,
    /// Move both points, keeping the span length
    #[default]
    Whole,
    /// Move only the end point
    End,
}

impl ShiftMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Whole => "whole",
            Self::End => "end",
        }
    }
}

impl fmt::Display for ShiftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lyric line with its time span in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cue {
    /// When the line starts (milliseconds from track start)
    pub begin: i64,
    /// When the line ends (milliseconds from track start)
    pub end: i64,
    /// The lyric text
    pub text: String,
}

impl Cue {
    /// Create a new cue. `begin <= end` is the caller's responsibility.
    pub fn new(begin: i64, end: i64, text: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            text: text.into(),
        }
    }

    /// Check whether `timestamp_ms` falls inside `[begin, end]`
    #[must_use]
    pub const fn contains(&self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.begin && timestamp_ms <= self.end
    }

    /// Distance from `timestamp_ms` to the closer of the two endpoints
    #[must_use]
    pub const fn endpoint_distance(&self, timestamp_ms: i64) -> i64 {
        let db = (self.begin - timestamp_ms).abs();
        let de = (self.end - timestamp_ms).abs();
        if db < de {
            db
        } else {
            de
        }
    }

    /// Move one or both endpoints by `delta_ms`.
    ///
    /// Applying the same mode with `-delta_ms` restores the previous span exactly.
    pub fn shift(&mut self, mode: ShiftMode, delta_ms: i64) {
        match mode {
            ShiftMode::Begin => self.begin += delta_ms,
            ShiftMode::Whole => {
                self.begin += delta_ms;
                self.end += delta_ms;
            }
            ShiftMode::End => self.end += delta_ms,
        }
    }
}
