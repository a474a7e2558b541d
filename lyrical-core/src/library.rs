//! Song directories on disk.
//!
//! Every song lives in `<songs root>/<name>/` next to a `song.ini` cue sheet.
//! Scanning reads only the `[Metadata]` section of each sheet.

use crate::codec;
use crate::error::{CoreError, Result};
use crate::paths::{filter_file_name, resolve_conflicting_name, SONG_FILE_NAME};
use crate::sheet::{CueSheet, Metadata};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Metadata of every song found under a songs root, keyed by song directory
#[derive(Debug, Clone, Default)]
pub struct SongLibrary {
    root: PathBuf,
    songs: BTreeMap<PathBuf, Metadata>,
}

impl SongLibrary {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            songs: BTreeMap::new(),
        }
    }

    /// Create a library and scan it immediately
    ///
    /// # Errors
    ///
    /// Returns an error if the songs root cannot be created or listed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let mut library = Self::new(root);
        library.refresh()?;
        Ok(library)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Songs ordered by directory path
    pub fn songs(&self) -> impl Iterator<Item = (&Path, &Metadata)> {
        self.songs.iter().map(|(dir, metadata)| (dir.as_path(), metadata))
    }

    #[must_use]
    pub fn get(&self, dir: &Path) -> Option<&Metadata> {
        self.songs.get(dir)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Rescan the songs root. Directories without a readable `song.ini` are
    /// skipped; the root is created if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the songs root cannot be created or listed.
    pub fn refresh(&mut self) -> Result<usize> {
        fs::create_dir_all(&self.root)?;
        self.songs.clear();

        for entry in fs::read_dir(&self.root)? {
            let dir = entry?.path();
            if !dir.is_dir() {
                continue;
            }
            let song_file = dir.join(SONG_FILE_NAME);
            if !song_file.is_file() {
                continue;
            }
            match fs::read_to_string(&song_file) {
                Ok(content) => {
                    let (metadata, warnings) = codec::decode_metadata(&content);
                    if !warnings.is_empty() {
                        debug!(
                            "{} metadata warnings in {}",
                            warnings.len(),
                            song_file.display()
                        );
                    }
                    self.songs.insert(dir, metadata);
                }
                Err(e) => warn!("Skipping {}: {e}", song_file.display()),
            }
        }

        info!(
            "Found {} songs in {}",
            self.songs.len(),
            self.root.display()
        );
        Ok(self.songs.len())
    }

    /// Move `<import_dir>/<file_name>` into a new song directory under this
    /// library and write a default `song.ini` referencing it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ImportNotFound`] if the file does not exist, or an
    /// I/O error if moving or writing fails.
    pub fn import(&mut self, import_dir: &Path, file_name: &str) -> Result<PathBuf> {
        let song_dir = create_song(import_dir, &self.root, file_name)?;
        let metadata = read_song(&song_dir)?.metadata;
        self.songs.insert(song_dir.clone(), metadata);
        Ok(song_dir)
    }
}

/// Files in the import folder, sorted by name
///
/// # Errors
///
/// Returns an error if the import folder cannot be listed.
pub fn list_importable(import_dir: &Path) -> Result<Vec<String>> {
    if !import_dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(import_dir)? {
        let entry = entry?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Create `<songs_root>/<file stem>/`, move the imported file into it, and
/// write a `song.ini` with default metadata pointing at the moved file.
///
/// # Errors
///
/// Returns [`CoreError::ImportNotFound`] if the file does not exist, or an
/// I/O error if moving or writing fails.
pub fn create_song(import_dir: &Path, songs_root: &Path, file_name: &str) -> Result<PathBuf> {
    let source = import_dir.join(file_name);
    if !source.is_file() {
        return Err(CoreError::ImportNotFound { path: source });
    }

    let stem = source
        .file_stem()
        .map_or_else(|| file_name.to_string(), |s| s.to_string_lossy().into_owned());
    let song_dir = songs_root.join(&stem);
    fs::create_dir_all(&song_dir)?;
    move_file(&source, &song_dir.join(file_name))?;

    let mut sheet = CueSheet::default();
    sheet.metadata.file_path = file_name.to_string();
    write_song(&song_dir, &sheet)?;

    info!("Imported {} into {}", file_name, song_dir.display());
    Ok(song_dir)
}

/// Directory name a song is saved under: `"<artist> - <title> (<charter>)"`
/// with characters that are not portable in file names replaced
#[must_use]
pub fn song_dir_name(metadata: &Metadata) -> String {
    filter_file_name(&format!(
        "{} - {} ({})",
        metadata.artist, metadata.title, metadata.charter
    ))
}

/// Rename `current_dir` after the song's metadata, unless it already has that
/// name or that name with a `" (N)"` suffix. A taken name gets a `" (N)"`
/// suffix.
///
/// # Errors
///
/// Returns an I/O error if the rename fails.
pub fn rename_song_dir(songs_root: &Path, current_dir: &Path, metadata: &Metadata) -> Result<PathBuf> {
    let wanted = song_dir_name(metadata);
    let current_name = current_dir.file_name().and_then(OsStr::to_str);
    if current_name.is_some_and(|name| is_name_or_numbered(name, &wanted)) {
        return Ok(current_dir.to_path_buf());
    }

    let resolved = resolve_conflicting_name(songs_root, &wanted);
    let target = songs_root.join(resolved);
    fs::rename(current_dir, &target)?;
    info!(
        "Renamed song directory {} -> {}",
        current_dir.display(),
        target.display()
    );
    Ok(target)
}

/// `name` is `wanted` itself or `wanted (N)`
fn is_name_or_numbered(name: &str, wanted: &str) -> bool {
    let Some(rest) = name.strip_prefix(wanted) else {
        return false;
    };
    rest.is_empty()
        || rest
            .strip_prefix(" (")
            .and_then(|rest| rest.strip_suffix(')'))
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Read and decode `<song_dir>/song.ini`, logging any parse warnings
///
/// # Errors
///
/// Returns [`CoreError::SongNotFound`] if the sheet is missing, or an I/O error.
pub fn read_song(song_dir: &Path) -> Result<CueSheet> {
    Ok(read_song_with_warnings(song_dir)?.sheet)
}

pub(crate) fn read_song_with_warnings(song_dir: &Path) -> Result<codec::Decoded> {
    let song_file = song_dir.join(SONG_FILE_NAME);
    if !song_file.is_file() {
        return Err(CoreError::SongNotFound {
            dir: song_dir.to_path_buf(),
        });
    }
    let content = fs::read_to_string(&song_file)?;
    Ok(codec::decode(&content))
}

/// Encode `sheet` into `<song_dir>/song.ini`
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_song(song_dir: &Path, sheet: &CueSheet) -> Result<()> {
    fs::write(song_dir.join(SONG_FILE_NAME), codec::encode(sheet))?;
    Ok(())
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_err() {
        // Rename fails across filesystems
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::Cue;

    fn write_sheet(dir: &Path, title: &str) {
        fs::create_dir_all(dir).unwrap();
        let mut sheet = CueSheet::default();
        sheet.metadata.title = title.to_string();
        sheet.insert(Cue::new(0, 1000, "line"));
        write_song(dir, &sheet).unwrap();
    }

    #[test]
    fn test_refresh_finds_song_dirs_only() {
        let root = tempfile::tempdir().unwrap();
        write_sheet(&root.path().join("one"), "One");
        write_sheet(&root.path().join("two"), "Two");
        fs::create_dir(root.path().join("empty")).unwrap();
        fs::write(root.path().join("stray.txt"), "x").unwrap();
        // Too deep to be picked up
        write_sheet(&root.path().join("nested").join("three"), "Three");

        let library = SongLibrary::open(root.path()).unwrap();
        let titles: Vec<_> = library.songs().map(|(_, m)| m.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two"]);
    }

    #[test]
    fn test_refresh_creates_missing_root() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("songs");

        let library = SongLibrary::open(&root).unwrap();
        assert!(library.is_empty());
        assert!(root.is_dir());
    }

    #[test]
    fn test_create_song_moves_audio() {
        let import = tempfile::tempdir().unwrap();
        let songs = tempfile::tempdir().unwrap();
        fs::write(import.path().join("track.ogg"), b"audio").unwrap();

        let dir = create_song(import.path(), songs.path(), "track.ogg").unwrap();

        assert_eq!(dir, songs.path().join("track"));
        assert!(!import.path().join("track.ogg").exists());
        assert_eq!(fs::read(dir.join("track.ogg")).unwrap(), b"audio");

        let sheet = read_song(&dir).unwrap();
        assert_eq!(sheet.metadata.file_path, "track.ogg");
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_create_song_missing_source() {
        let import = tempfile::tempdir().unwrap();
        let songs = tempfile::tempdir().unwrap();

        let result = create_song(import.path(), songs.path(), "nope.ogg");
        assert!(matches!(result, Err(CoreError::ImportNotFound { .. })));
    }

    #[test]
    fn test_library_import_registers_song() {
        let import = tempfile::tempdir().unwrap();
        let songs = tempfile::tempdir().unwrap();
        fs::write(import.path().join("a.wav"), b"").unwrap();
        fs::write(import.path().join("b.mp3"), b"").unwrap();
        assert_eq!(list_importable(import.path()).unwrap(), ["a.wav", "b.mp3"]);

        let mut library = SongLibrary::open(songs.path()).unwrap();
        let dir = library.import(import.path(), "a.wav").unwrap();

        assert_eq!(library.len(), 1);
        assert_eq!(library.get(&dir).unwrap().file_path, "a.wav");
        assert_eq!(list_importable(import.path()).unwrap(), ["b.mp3"]);
    }

    #[test]
    fn test_song_dir_name() {
        let metadata = Metadata {
            artist: "AC/DC".to_string(),
            title: "Who?".to_string(),
            charter: "me".to_string(),
            ..Metadata::default()
        };
        assert_eq!(song_dir_name(&metadata), "AC_DC - Who_ (me)");
    }

    #[test]
    fn test_rename_song_dir_resolves_conflicts() {
        let songs = tempfile::tempdir().unwrap();
        let metadata = Metadata {
            artist: "A".to_string(),
            title: "B".to_string(),
            charter: "c".to_string(),
            ..Metadata::default()
        };
        fs::create_dir(songs.path().join("A - B (c)")).unwrap();
        let current = songs.path().join("track");
        fs::create_dir(&current).unwrap();

        let renamed = rename_song_dir(songs.path(), &current, &metadata).unwrap();
        assert_eq!(renamed, songs.path().join("A - B (c) (1)"));
        assert!(renamed.is_dir());
        assert!(!current.exists());

        // Already named correctly: left alone
        let same = songs.path().join("A - B (c)");
        assert_eq!(rename_song_dir(songs.path(), &same, &metadata).unwrap(), same);
    }

    #[test]
    fn test_rename_song_dir_is_stable_across_saves() {
        let songs = tempfile::tempdir().unwrap();
        let metadata = Metadata {
            artist: "A".to_string(),
            title: "B".to_string(),
            charter: "c".to_string(),
            ..Metadata::default()
        };
        fs::create_dir(songs.path().join("A - B (c)")).unwrap();
        let current = songs.path().join("track");
        fs::create_dir(&current).unwrap();

        let first = rename_song_dir(songs.path(), &current, &metadata).unwrap();
        assert_eq!(first, songs.path().join("A - B (c) (1)"));
        for _ in 0..2 {
            assert_eq!(rename_song_dir(songs.path(), &first, &metadata).unwrap(), first);
        }
        assert!(first.is_dir());
        assert!(!songs.path().join("A - B (c) (2)").exists());

        // A changed title still moves it
        let retitled = Metadata {
            title: "D".to_string(),
            ..metadata
        };
        let moved = rename_song_dir(songs.path(), &first, &retitled).unwrap();
        assert_eq!(moved, songs.path().join("A - D (c)"));
    }

    #[test]
    fn test_is_name_or_numbered() {
        assert!(is_name_or_numbered("A - B (c)", "A - B (c)"));
        assert!(is_name_or_numbered("A - B (c) (12)", "A - B (c)"));
        assert!(!is_name_or_numbered("A - B (c) ()", "A - B (c)"));
        assert!(!is_name_or_numbered("A - B (c) (x)", "A - B (c)"));
        assert!(!is_name_or_numbered("A - B (c)x", "A - B (c)"));
        assert!(!is_name_or_numbered("track", "A - B (c)"));
    }

    #[test]
    fn test_read_song_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_song(dir.path()),
            Err(CoreError::SongNotFound { .. })
        ));
    }
}
