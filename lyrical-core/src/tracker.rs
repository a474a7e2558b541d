//! Active cue pointer and intra-cue progress.
//!
//! [`CueTracker::update`] only scans forward, so it expects non-decreasing
//! timestamps. After any seek call [`CueTracker::resync_to_timestamp`]; after
//! inserting or deleting cues call [`CueTracker::reset`].

use crate::cue::Cue;

/// Snapshot returned by every tracker update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerUpdate {
    /// Index of the active cue, `None` when there are no cues
    pub active_index: Option<usize>,
    /// Fraction of the active cue already sung, in `[0, 1]`
    pub progress: f32,
    /// True once the timestamp has passed the last cue's end
    pub finished: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CueTracker {
    active_index: Option<usize>,
    progress: f32,
    finished: bool,
}

impl CueTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Forget the active cue. The next update scans from the first cue.
    pub fn reset(&mut self) {
        self.active_index = None;
        self.progress = 0.0;
        self.finished = false;
    }

    /// Advance the active cue for `current_ms` and recompute progress.
    ///
    /// Inside a gap before the active cue the previous progress is kept.
    pub fn update(&mut self, cues: &[Cue], current_ms: i64) -> TrackerUpdate {
        let Some(last) = cues.len().checked_sub(1) else {
            self.active_index = None;
            self.progress = 0.0;
            self.finished = true;
            return self.snapshot();
        };

        let mut index = self.active_index.map_or(0, |index| index.min(last));
        while current_ms > cues[index].end && index < last {
            index += 1;
            self.progress = 0.0;
        }

        let cue = &cues[index];
        if current_ms > cue.end {
            self.progress = 0.0;
        } else if current_ms >= cue.begin {
            self.progress = span_progress(cue, current_ms);
        }

        self.active_index = Some(index);
        self.finished = index == last && current_ms > cue.end;
        self.snapshot()
    }

    /// Re-point the tracker after a jump in either direction.
    ///
    /// Selects the first cue whose end is at or after `timestamp_ms` (the cue
    /// containing it, or the next one in a gap), clamped to the last cue.
    pub fn resync_to_timestamp(&mut self, cues: &[Cue], timestamp_ms: i64) -> TrackerUpdate {
        let Some(last) = cues.len().checked_sub(1) else {
            return self.update(cues, timestamp_ms);
        };

        let index = cues
            .iter()
            .position(|cue| timestamp_ms <= cue.end)
            .unwrap_or(last);
        let cue = &cues[index];

        self.active_index = Some(index);
        self.progress = if cue.contains(timestamp_ms) {
            span_progress(cue, timestamp_ms)
        } else {
            0.0
        };
        self.finished = index == last && timestamp_ms > cue.end;
        self.snapshot()
    }

    const fn snapshot(&self) -> TrackerUpdate {
        TrackerUpdate {
            active_index: self.active_index,
            progress: self.progress,
            finished: self.finished,
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn span_progress(cue: &Cue, current_ms: i64) -> f32 {
    let span = cue.end - cue.begin;
    if span <= 0 {
        return 1.0;
    }
    let remaining = (cue.end - current_ms) as f64 / span as f64;
    (1.0 - remaining).clamp(0.0, 1.0) as f32
}
