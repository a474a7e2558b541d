//! One loaded song: its cue sheet, playback clock, tracker, and audio device.
//!
//! [`SongSession::frame`] is the per-frame entry point. It ticks the clock and
//! feeds the reading to the tracker, so anything read afterwards in the same
//! frame sees a consistent index and progress.

use crate::audio::{AudioBackend, AudioDevice};
use crate::clock::{Clock, ClockState, PlaybackClock, SystemClock};
use crate::codec::ParseWarning;
use crate::cue::Cue;
use crate::error::{ClockError, Result};
use crate::library;
use crate::sheet::CueSheet;
use crate::tracker::CueTracker;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Problems found while opening a song that did not stop it from loading
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub warnings: Vec<ParseWarning>,
    /// The referenced audio file was absent; a silent device was substituted
    pub missing_audio: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub state: ClockState,
    pub timestamp_ms: i64,
    pub active_index: Option<usize>,
    pub progress: f32,
    pub finished: bool,
}

pub struct SongSession<C: Clock = SystemClock> {
    dir: PathBuf,
    sheet: CueSheet,
    clock: PlaybackClock<C>,
    tracker: CueTracker,
    audio: Box<dyn AudioDevice>,
    volume: f32,
}

impl<C: Clock> std::fmt::Debug for SongSession<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SongSession")
            .field("dir", &self.dir)
            .field("cues", &self.sheet.len())
            .field("state", &self.clock.state())
            .field("active_index", &self.tracker.active_index())
            .finish_non_exhaustive()
    }
}

impl<C: Clock> SongSession<C> {
    /// Load `<dir>/song.ini` and its audio file.
    ///
    /// A missing or unnamed audio file is not an error: the backend's silent
    /// device is used instead and [`LoadReport::missing_audio`] is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet is missing or unreadable, or if the
    /// backend fails to open an existing audio file.
    pub fn open(dir: &Path, backend: &dyn AudioBackend, clock: C) -> Result<(Self, LoadReport)> {
        let decoded = library::read_song_with_warnings(dir)?;
        let sheet = decoded.sheet;
        let mut report = LoadReport {
            warnings: decoded.warnings,
            missing_audio: false,
        };

        let audio_path = dir.join(&sheet.metadata.file_path);
        let audio = if sheet.metadata.file_path.is_empty() || !audio_path.is_file() {
            warn!(
                "Audio file {} not found, playing silence",
                audio_path.display()
            );
            report.missing_audio = true;
            backend.silence()
        } else {
            backend.open(&audio_path)?
        };

        info!(
            "Opened {} ({} lines)",
            dir.display(),
            sheet.len()
        );
        Ok((Self::from_parts(dir, sheet, audio, clock), report))
    }

    /// Assemble a session from an already loaded sheet and device
    #[must_use]
    pub fn from_parts(
        dir: impl Into<PathBuf>,
        sheet: CueSheet,
        audio: Box<dyn AudioDevice>,
        clock: C,
    ) -> Self {
        let offset_ms = sheet.metadata.offset_ms;
        Self {
            dir: dir.into(),
            sheet,
            clock: PlaybackClock::new(clock, offset_ms),
            tracker: CueTracker::new(),
            audio,
            volume: 1.0,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub const fn sheet(&self) -> &CueSheet {
        &self.sheet
    }

    #[must_use]
    pub const fn clock(&self) -> &PlaybackClock<C> {
        &self.clock
    }

    #[must_use]
    pub const fn tracker(&self) -> &CueTracker {
        &self.tracker
    }

    #[must_use]
    pub fn audio(&self) -> &dyn AudioDevice {
        self.audio.as_ref()
    }

    /// Track position reported by the last frame
    #[must_use]
    pub const fn timestamp_ms(&self) -> i64 {
        self.clock.last_timestamp_ms()
    }

    /// The active cue, only once playback has started
    #[must_use]
    pub fn current_cue(&self) -> Option<&Cue> {
        if !self.clock.is_started() {
            return None;
        }
        self.tracker
            .active_index()
            .and_then(|index| self.sheet.get(index))
    }

    /// Output volume in `[0, 1]`, applied now and on every play or resume
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.audio.set_volume(self.volume);
    }

    /// Start from the beginning
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::AlreadyPlaying`] once playback has started.
    pub fn play(&mut self) -> Result<()> {
        self.clock.play()?;
        self.audio.play();
        self.audio.set_volume(self.volume);
        debug!("Playback started");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a [`ClockError`] unless playing.
    pub fn pause(&mut self) -> Result<()> {
        self.clock.pause()?;
        self.audio.pause();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ClockError::NotPaused`] unless paused.
    pub fn resume(&mut self) -> Result<()> {
        self.clock.resume()?;
        self.audio.resume();
        self.audio.set_volume(self.volume);
        Ok(())
    }

    /// Play when stopped, otherwise flip between playing and paused.
    /// Returns the new state.
    ///
    /// # Errors
    ///
    /// Only fails if the clock and device disagree about the state.
    pub fn toggle_playback(&mut self) -> Result<ClockState> {
        match self.clock.state() {
            ClockState::Stopped => self.play()?,
            ClockState::Paused => self.resume()?,
            ClockState::Playing => self.pause()?,
        }
        Ok(self.clock.state())
    }

    /// Jump to `position_ms` (clamped to zero) and resync the tracker.
    ///
    /// While playing, playback continues from the new position. Otherwise
    /// playback is started or resumed just long enough to reposition the
    /// device, and the session ends up paused at the target.
    ///
    /// # Errors
    ///
    /// Only fails if the clock and device disagree about the state.
    pub fn skip(&mut self, position_ms: i64) -> Result<Frame> {
        let position_ms = position_ms.max(0);

        if self.audio.is_playing() {
            self.audio.seek(position_ms);
        } else {
            match self.clock.state() {
                ClockState::Stopped => self.play()?,
                ClockState::Paused => self.resume()?,
                ClockState::Playing => {}
            }
            self.audio.seek(position_ms);
            self.pause()?;
        }

        self.clock.seek(position_ms)?;
        let update = self
            .tracker
            .resync_to_timestamp(self.sheet.cues(), position_ms);
        debug!("Skipped to {position_ms}ms");

        Ok(Frame {
            state: self.clock.state(),
            timestamp_ms: position_ms,
            active_index: update.active_index,
            progress: update.progress,
            finished: update.finished,
        })
    }

    /// Tick the clock and advance the tracker. Call once per frame.
    pub fn frame(&mut self) -> Frame {
        let timestamp_ms = self.clock.tick();
        let update = self.tracker.update(self.sheet.cues(), timestamp_ms);
        Frame {
            state: self.clock.state(),
            timestamp_ms,
            active_index: update.active_index,
            progress: update.progress,
            finished: update.finished,
        }
    }

    /// Stop playback and forget the active cue
    pub fn stop(&mut self) {
        if self.audio.is_playing() {
            self.audio.pause();
        }
        self.clock.stop();
        self.tracker.reset();
    }

    /// Recompute the song length, rename the song directory after its
    /// metadata if needed, and write `song.ini`. Returns the directory the
    /// song now lives in.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the rename or write fails. The in-memory sheet
    /// is kept either way.
    pub fn save(&mut self) -> Result<PathBuf> {
        self.sheet.refresh_length();

        if let Some(songs_root) = self.dir.parent() {
            let renamed = library::rename_song_dir(songs_root, &self.dir, &self.sheet.metadata)?;
            self.dir = renamed;
        }
        library::write_song(&self.dir, &self.sheet)?;

        info!("Saved {}", self.dir.display());
        Ok(self.dir.clone())
    }

    /// Mutable access for editing; structural edits must reset the tracker
    pub(crate) fn edit_parts(&mut self) -> (&mut CueSheet, &mut CueTracker) {
        (&mut self.sheet, &mut self.tracker)
    }

    pub(crate) fn ensure_paused(&mut self) -> std::result::Result<(), ClockError> {
        if self.clock.state() == ClockState::Playing {
            self.clock.pause()?;
            self.audio.pause();
        }
        Ok(())
    }
}
