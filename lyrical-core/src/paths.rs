//! Path constants and file-name helpers for config, logs, and song folders.

use std::path::{Path, PathBuf};

/// The name of the configuration directory under ~/.config/
pub const CONFIG_DIR_NAME: &str = "lyrical";

/// The name of the main configuration file
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// The name of the log file written when file logging is enabled
pub const LOG_FILE_NAME: &str = "lyrical.log";

/// The cue sheet file inside every song directory
pub const SONG_FILE_NAME: &str = "song.ini";

/// Characters Windows refuses in file names (Linux only refuses `/`)
const FORBIDDEN_FILE_NAME_CHARS: [char; 9] = ['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// Get the configuration directory path (~/.config/lyrical/)
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(CONFIG_DIR_NAME)
}

/// Get the config file path (~/.config/lyrical/config.toml)
#[must_use]
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Get the log file path (`<cache dir>/lyrical/lyrical.log`)
#[must_use]
pub fn log_file_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(LOG_FILE_NAME)
}

/// Default songs root (`<data dir>/lyrical/songs`)
#[must_use]
pub fn default_songs_dir() -> PathBuf {
    data_dir().join("songs")
}

/// Default folder scanned for audio files to import (`<data dir>/lyrical/import`)
#[must_use]
pub fn default_import_dir() -> PathBuf {
    data_dir().join("import")
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Replace characters that are not portable in file names with `_`, one for one.
///
/// Covers control characters, `/ \ < > : " | ? *`, and a trailing `.`.
#[must_use]
pub fn filter_file_name(name: &str) -> String {
    let last = name.chars().count().saturating_sub(1);
    name.chars()
        .enumerate()
        .map(|(i, c)| {
            let forbidden = u32::from(c) <= 31
                || FORBIDDEN_FILE_NAME_CHARS.contains(&c)
                || (i == last && c == '.');
            if forbidden {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Split `name` into stem and extension. Only 1 to 16 ASCII alphanumerics
/// after the last `.` count as an extension.
#[must_use]
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=16).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            (stem, Some(ext))
        }
        _ => (name, None),
    }
}

/// Pick a name under `root` that does not exist yet, appending `" (N)"` before
/// the extension for `N = 1, 2, ...` when `name` is taken.
#[must_use]
pub fn resolve_conflicting_name(root: &Path, name: &str) -> String {
    if !root.join(name).exists() {
        return name.to_string();
    }

    let (stem, ext) = split_extension(name);
    (1_u32..)
        .map(|n| match ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        })
        .find(|candidate| !root.join(candidate).exists())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_filter_file_name() {
        assert_eq!(filter_file_name("A/B: C"), "A_B_ C");
        assert_eq!(filter_file_name(r#"a\b<c>d"e|f?g*h"#), "a_b_c_d_e_f_g_h");
    }

    #[test]
    fn test_filter_trailing_dot_and_control_chars() {
        assert_eq!(filter_file_name("Mr. Sandman."), "Mr. Sandman_");
        assert_eq!(filter_file_name("tab\there\n"), "tab_here_");
        assert_eq!(filter_file_name(""), "");
    }

    #[test]
    fn test_filter_keeps_unicode() {
        assert_eq!(filter_file_name("歌手 - 曲 (誰)"), "歌手 - 曲 (誰)");
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("song.ogg"), ("song", Some("ogg")));
        assert_eq!(split_extension("my.song.mp3"), ("my.song", Some("mp3")));
        assert_eq!(split_extension("Artist - Title (me)"), ("Artist - Title (me)", None));
        assert_eq!(split_extension("odd.ext with space"), ("odd.ext with space", None));
        assert_eq!(split_extension(".hidden"), (".hidden", None));
    }

    #[test]
    fn test_resolve_conflicting_name() {
        let root = tempfile::tempdir().unwrap();
        assert_eq!(resolve_conflicting_name(root.path(), "A - B (c)"), "A - B (c)");

        fs::create_dir(root.path().join("A - B (c)")).unwrap();
        assert_eq!(
            resolve_conflicting_name(root.path(), "A - B (c)"),
            "A - B (c) (1)"
        );

        fs::create_dir(root.path().join("A - B (c) (1)")).unwrap();
        assert_eq!(
            resolve_conflicting_name(root.path(), "A - B (c)"),
            "A - B (c) (2)"
        );
    }

    #[test]
    fn test_resolve_conflicting_file_keeps_extension() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("track.ogg"), b"").unwrap();

        assert_eq!(
            resolve_conflicting_name(root.path(), "track.ogg"),
            "track (1).ogg"
        );
    }

    #[test]
    fn test_paths_use_app_dir_name() {
        assert!(config_path().ends_with("lyrical/config.toml"));
        assert!(log_file_path().ends_with("lyrical/lyrical.log"));
    }
}
