use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricalConfig {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Root folder holding one directory per song
    #[serde(default = "crate::paths::default_songs_dir")]
    pub songs_dir: PathBuf,
    /// Folder scanned for audio files to turn into new songs
    #[serde(default = "crate::paths::default_import_dir")]
    pub import_dir: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            songs_dir: crate::paths::default_songs_dir(),
            import_dir: crate::paths::default_import_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Music volume in percent (0-100)
    #[serde(default = "default_music_volume")]
    pub music_volume: u8,
    /// How often the host advances the clock and tracker
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

const fn default_music_volume() -> u8 {
    100
}

const fn default_frame_rate() -> u32 {
    60
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            music_volume: default_music_volume(),
            frame_rate: default_frame_rate(),
        }
    }
}

impl PlaybackConfig {
    /// Volume as the `[0, 1]` factor audio devices expect
    #[must_use]
    pub fn volume_factor(&self) -> f32 {
        f32::from(self.music_volume.min(100)) / 100.0
    }
}

/// Shift increment chosen by the modifier keys held while moving a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftStep {
    Fine,
    #[default]
    Normal,
    Coarse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// How far the browse keys skip (milliseconds)
    #[serde(default = "default_skip_ms")]
    pub skip_ms: i64,
    #[serde(default = "default_shift_fine_ms")]
    pub shift_fine_ms: i64,
    #[serde(default = "default_shift_normal_ms")]
    pub shift_normal_ms: i64,
    #[serde(default = "default_shift_coarse_ms")]
    pub shift_coarse_ms: i64,
}

const fn default_skip_ms() -> i64 {
    5000
}

const fn default_shift_fine_ms() -> i64 {
    1
}

const fn default_shift_normal_ms() -> i64 {
    10
}

const fn default_shift_coarse_ms() -> i64 {
    100
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            skip_ms: default_skip_ms(),
            shift_fine_ms: default_shift_fine_ms(),
            shift_normal_ms: default_shift_normal_ms(),
            shift_coarse_ms: default_shift_coarse_ms(),
        }
    }
}

impl EditorConfig {
    /// Signed shift delta for one key press
    #[must_use]
    pub const fn shift_delta(&self, step: ShiftStep, forward: bool) -> i64 {
        let amount = match step {
            ShiftStep::Fine => self.shift_fine_ms,
            ShiftStep::Normal => self.shift_normal_ms,
            ShiftStep::Coarse => self.shift_coarse_ms,
        };
        if forward {
            amount
        } else {
            -amount
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to the cache directory
    #[serde(default)]
    pub enabled: bool,
}

impl LyricalConfig {
    /// Get the configuration directory path (~/.config/lyrical/)
    #[must_use]
    pub fn config_dir() -> PathBuf {
        crate::paths::config_dir()
    }

    /// Get the config file path (~/.config/lyrical/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from the default path or create a template on first run
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template, or an
    /// error if the file cannot be read, parsed, or validated.
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path())
    }

    /// Load config from `config_path`, writing the template there if missing
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template, or an
    /// error if the file cannot be read, parsed, or validated.
    pub fn load_or_create_at(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            // Create config directory if it doesn't exist
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            // Write template config
            fs::write(config_path, CONFIG_TEMPLATE)?;

            return Err(CoreError::ConfigNotFound {
                path: config_path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(config_path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate config text
    ///
    /// # Errors
    ///
    /// Returns an error on TOML syntax errors or out-of-range values.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.playback.music_volume > 100 {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "playback.music_volume must be between 0 and 100, got {}",
                    self.playback.music_volume
                ),
            });
        }
        if self.playback.frame_rate == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "playback.frame_rate must be greater than 0".to_string(),
            });
        }
        if self.editor.skip_ms <= 0 {
            return Err(CoreError::ConfigInvalid {
                message: "editor.skip_ms must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r##"# Lyrical Configuration
# ~/.config/lyrical/config.toml

[library]
# Defaults to <data dir>/lyrical/songs and <data dir>/lyrical/import
# songs_dir = "/path/to/songs"
# import_dir = "/path/to/import"

[playback]
music_volume = 100  # 0-100
frame_rate = 60

[editor]
# Browse keys skip by this much (milliseconds)
skip_ms = 5000
# Line shift steps: fine (Alt held), normal, coarse (Shift held)
shift_fine_ms = 1
shift_normal_ms = 10
shift_coarse_ms = 100

[logging]
# Also write logs to <cache dir>/lyrical/lyrical.log
enabled = false
"##;
