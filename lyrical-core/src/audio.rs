//! Audio device seam.
//!
//! Decoding and output live outside this crate. The session only calls these
//! methods and trusts their timing.

use crate::error::Result;
use std::path::Path;

/// A loaded track that can be played, paused, and repositioned
pub trait AudioDevice {
    /// Start playback from the beginning
    fn play(&mut self);

    fn pause(&mut self);

    /// Continue from the paused position
    fn resume(&mut self);

    /// Move the playback position
    fn seek(&mut self, position_ms: i64);

    /// Set output volume in `[0, 1]`
    fn set_volume(&mut self, volume: f32);

    fn is_playing(&self) -> bool;
}

/// Opens audio files into devices
pub trait AudioBackend {
    /// Load the audio file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded.
    fn open(&self, path: &Path) -> Result<Box<dyn AudioDevice>>;

    /// A device that plays nothing, substituted when the referenced file is missing
    fn silence(&self) -> Box<dyn AudioDevice> {
        Box::new(SilentAudio::default())
    }
}

/// Device that produces no sound but tracks its own state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SilentAudio {
    playing: bool,
    position_ms: i64,
    volume: f32,
}

impl SilentAudio {
    /// Last position passed to [`AudioDevice::seek`]
    #[must_use]
    pub const fn position_ms(&self) -> i64 {
        self.position_ms
    }

    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }
}

impl AudioDevice for SilentAudio {
    fn play(&mut self) {
        self.playing = true;
        self.position_ms = 0;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn resume(&mut self) {
        self.playing = true;
    }

    fn seek(&mut self, position_ms: i64) {
        self.position_ms = position_ms.max(0);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Backend whose devices are all silent; used by headless hosts
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn open(&self, _path: &Path) -> Result<Box<dyn AudioDevice>> {
        Ok(self.silence())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_audio_tracks_state() {
        let mut device = SilentAudio::default();
        assert!(!device.is_playing());

        device.play();
        device.seek(-20);
        device.set_volume(1.5);
        assert!(device.is_playing());
        assert_eq!(device.position_ms(), 0);
        assert_eq!(device.volume(), 1.0);

        device.pause();
        assert!(!device.is_playing());
        device.resume();
        assert!(device.is_playing());
    }
}
