//! Logical track clock anchored to a monotonic time source.
//!
//! The clock does not drive audio. Callers pause/seek the audio device and
//! then mirror the change here.

use crate::error::ClockError;
use crate::time::DurationExt;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time readings
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for simulating time without sleeping.
///
/// Clones share the same reading, so a test can keep one handle and give
/// another to a [`PlaybackClock`].
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Observable state of a [`PlaybackClock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Playing,
    Paused,
}

/// An instant pinned to a raw track position.
///
/// Equivalent to storing `now - position` as the anchor, without ever
/// subtracting from an [`Instant`].
#[derive(Debug, Clone, Copy)]
struct Anchor {
    instant: Instant,
    position_ms: i64,
}

impl Anchor {
    fn raw_position_at(&self, at: Instant) -> i64 {
        self.position_ms
            .saturating_add(at.saturating_duration_since(self.instant).as_millis_i64())
    }
}

/// Logical track clock: `STOPPED -> PLAYING <-> PAUSED`, with seeking in
/// either running state.
#[derive(Debug)]
pub struct PlaybackClock<C: Clock = SystemClock> {
    clock: C,
    anchor: Option<Anchor>,
    paused_at: Option<Instant>,
    offset_ms: i64,
    last_timestamp_ms: i64,
}

impl PlaybackClock<SystemClock> {
    /// Create a stopped clock reading the system monotonic clock
    #[must_use]
    pub const fn system(offset_ms: i64) -> Self {
        Self::new(SystemClock, offset_ms)
    }
}

impl<C: Clock> PlaybackClock<C> {
    /// Create a stopped clock. `offset_ms` is subtracted from every reading.
    pub const fn new(clock: C, offset_ms: i64) -> Self {
        Self {
            clock,
            anchor: None,
            paused_at: None,
            offset_ms,
            last_timestamp_ms: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ClockState {
        match (self.anchor.is_some(), self.paused_at.is_some()) {
            (false, _) => ClockState::Stopped,
            (true, false) => ClockState::Playing,
            (true, true) => ClockState::Paused,
        }
    }

    /// True once started, including while paused
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.anchor.is_some()
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    #[must_use]
    pub const fn offset_ms(&self) -> i64 {
        self.offset_ms
    }

    /// The value returned by the most recent [`tick`](Self::tick)
    #[must_use]
    pub const fn last_timestamp_ms(&self) -> i64 {
        self.last_timestamp_ms
    }

    /// Start the clock from track position zero
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::AlreadyPlaying`] if the clock was already started.
    pub fn play(&mut self) -> Result<(), ClockError> {
        if self.is_started() {
            return Err(ClockError::AlreadyPlaying);
        }
        self.restart();
        Ok(())
    }

    /// Re-anchor at track position zero and play, whatever the current state
    pub fn restart(&mut self) {
        self.anchor = Some(Anchor {
            instant: self.clock.now(),
            position_ms: 0,
        });
        self.paused_at = None;
    }

    /// Freeze the clock at the current instant
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::NotPlaying`] if stopped, [`ClockError::AlreadyPaused`]
    /// if already paused.
    pub fn pause(&mut self) -> Result<(), ClockError> {
        match self.state() {
            ClockState::Stopped => Err(ClockError::NotPlaying),
            ClockState::Paused => Err(ClockError::AlreadyPaused),
            ClockState::Playing => {
                let now = self.clock.now();
                self.last_timestamp_ms = self.timestamp_at(now);
                self.paused_at = Some(now);
                Ok(())
            }
        }
    }

    /// Continue from where [`pause`](Self::pause) froze the clock
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::NotPaused`] unless the clock is paused.
    pub fn resume(&mut self) -> Result<(), ClockError> {
        let (Some(anchor), Some(paused_at)) = (self.anchor.as_mut(), self.paused_at) else {
            return Err(ClockError::NotPaused);
        };
        // Slide the anchor forward so the paused interval is not counted
        anchor.instant += self.clock.now().saturating_duration_since(paused_at);
        self.paused_at = None;
        Ok(())
    }

    /// Move the logical position so the next tick reports `target_ms`
    /// (clamped to zero). Play/pause state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Stopped`] if the clock was never started.
    pub fn seek(&mut self, target_ms: i64) -> Result<(), ClockError> {
        if !self.is_started() {
            return Err(ClockError::Stopped);
        }
        let target_ms = target_ms.max(0);
        // While paused the anchor is pinned to the pause instant so the
        // frozen reading becomes the target
        let instant = self.paused_at.unwrap_or_else(|| self.clock.now());
        self.anchor = Some(Anchor {
            instant,
            position_ms: target_ms.saturating_add(self.offset_ms),
        });
        self.last_timestamp_ms = target_ms;
        Ok(())
    }

    /// Return to the stopped state. The next tick reports zero.
    pub fn stop(&mut self) {
        self.anchor = None;
        self.paused_at = None;
        self.last_timestamp_ms = 0;
    }

    /// Compute the current track position in milliseconds.
    ///
    /// Frozen while paused, zero while stopped.
    pub fn tick(&mut self) -> i64 {
        self.last_timestamp_ms = match self.state() {
            ClockState::Stopped => 0,
            ClockState::Paused => self.last_timestamp_ms,
            ClockState::Playing => self.timestamp_at(self.clock.now()),
        };
        self.last_timestamp_ms
    }

    fn timestamp_at(&self, at: Instant) -> i64 {
        self.anchor.map_or(0, |anchor| {
            anchor.raw_position_at(at).saturating_sub(self.offset_ms)
        })
    }
}
