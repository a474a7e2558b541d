pub mod audio;
pub mod clock;
pub mod codec;
pub mod config;
pub mod cue;
pub mod edit_session;
pub mod editor;
pub mod error;
pub mod library;
pub mod paths;
pub mod session;
pub mod sheet;
pub mod time;
pub mod tracker;
pub mod transition;

pub use audio::{AudioBackend, AudioDevice, SilentAudio, SilentBackend};
pub use clock::{Clock, ClockState, ManualClock, PlaybackClock, SystemClock};
pub use codec::{decode, decode_metadata, encode, Decoded, ParseWarning, ParseWarningKind};
pub use config::{
    EditorConfig, LibraryConfig, LoggingConfig, LyricalConfig, PlaybackConfig, ShiftStep,
};
pub use cue::{Cue, ShiftMode};
pub use edit_session::{Direction, EditSession};
pub use editor::{CueEditor, EditorMode};
pub use error::{ClockError, CoreError, EditError, Result};
pub use library::SongLibrary;
pub use paths::{
    config_dir, config_path, log_file_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_FILE_NAME,
    SONG_FILE_NAME,
};
pub use session::{Frame, LoadReport, SongSession};
pub use sheet::{CueSheet, Metadata, MetadataField};
pub use time::DurationExt;
pub use tracker::{CueTracker, TrackerUpdate};
pub use transition::{Scene, SceneTransition};
