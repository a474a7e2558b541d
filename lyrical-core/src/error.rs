use crate::editor::EditorMode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Config file not found at {path}. A template has been created - please review it and restart.")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Song errors
    #[error("No song.ini found in {dir}")]
    SongNotFound { dir: PathBuf },

    #[error("Import source does not exist: {path}")]
    ImportNotFound { path: PathBuf },

    #[error("Audio device failed: {reason}")]
    AudioFailed { reason: String },

    // Engine errors
    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Edit(#[from] EditError),

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Invalid transitions of the playback clock state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("Playback clock is already running")]
    AlreadyPlaying,

    #[error("Playback clock is not playing")]
    NotPlaying,

    #[error("Playback clock is already paused")]
    AlreadyPaused,

    #[error("Playback clock is not paused")]
    NotPaused,

    #[error("Playback clock has not been started")]
    Stopped,
}

/// Editor operations attempted outside the mode that allows them
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Cannot {operation} while {mode}")]
    InvalidState {
        operation: &'static str,
        mode: EditorMode,
    },

    #[error("Cue index {index} out of range (sheet has {len} cues)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Sheet has no cues to select")]
    NoCues,
}

pub type Result<T> = std::result::Result<T, CoreError>;
