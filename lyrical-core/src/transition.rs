//! Typed hand-off between the song select screen and the editor or player.

use crate::audio::AudioBackend;
use crate::clock::Clock;
use crate::config::LyricalConfig;
use crate::edit_session::EditSession;
use crate::error::Result;
use crate::library;
use crate::session::{LoadReport, SongSession};
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Where to go after a song has been picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneTransition {
    /// Edit the song in this directory
    OpenExistingSong(PathBuf),
    /// Import this file from the import folder, then edit the new song
    ImportNewSong(String),
    /// Play the song in this directory
    PlaySong(PathBuf),
}

impl fmt::Display for SceneTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenExistingSong(dir) => write!(f, "edit {}", dir.display()),
            Self::ImportNewSong(name) => write!(f, "import {name}"),
            Self::PlaySong(dir) => write!(f, "play {}", dir.display()),
        }
    }
}

/// The scene a transition resolves into
#[derive(Debug)]
pub enum Scene<C: Clock> {
    Edit(EditSession<C>),
    Play(SongSession<C>),
}

impl SceneTransition {
    /// Load the song this transition names, importing it first if needed.
    /// The session's volume is taken from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the import fails or the song cannot be opened.
    pub fn resolve<C: Clock>(
        self,
        config: &LyricalConfig,
        backend: &dyn AudioBackend,
        clock: C,
    ) -> Result<(Scene<C>, LoadReport)> {
        info!("Scene transition: {self}");
        let (dir, edit) = match self {
            Self::OpenExistingSong(dir) => (dir, true),
            Self::ImportNewSong(name) => {
                let dir = library::create_song(
                    &config.library.import_dir,
                    &config.library.songs_dir,
                    &name,
                )?;
                (dir, true)
            }
            Self::PlaySong(dir) => (dir, false),
        };

        let (mut session, report) = SongSession::open(&dir, backend, clock)?;
        session.set_volume(config.playback.volume_factor());

        let scene = if edit {
            Scene::Edit(EditSession::new(session, config.editor.clone()))
        } else {
            Scene::Play(session)
        };
        Ok((scene, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentBackend;
    use crate::clock::ManualClock;
    use crate::config::LibraryConfig;
    use std::fs;

    fn config(songs: &std::path::Path, import: &std::path::Path) -> LyricalConfig {
        LyricalConfig {
            library: LibraryConfig {
                songs_dir: songs.to_path_buf(),
                import_dir: import.to_path_buf(),
            },
            ..LyricalConfig::default()
        }
    }

    #[test]
    fn test_import_resolves_to_editor() {
        let songs = tempfile::tempdir().unwrap();
        let import = tempfile::tempdir().unwrap();
        fs::write(import.path().join("tune.ogg"), b"").unwrap();
        let config = config(songs.path(), import.path());

        let (scene, report) = SceneTransition::ImportNewSong("tune.ogg".to_string())
            .resolve(&config, &SilentBackend, ManualClock::new())
            .unwrap();

        assert!(!report.missing_audio);
        let Scene::Edit(edit) = scene else {
            panic!("expected editor scene");
        };
        assert_eq!(edit.session().dir(), songs.path().join("tune"));
        assert!(!edit.is_dirty());
    }

    #[test]
    fn test_play_reports_missing_audio() {
        let songs = tempfile::tempdir().unwrap();
        let dir = songs.path().join("song");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("song.ini"), "[Metadata]\nFile=gone.ogg\n[Lines]\n0,10,x\n").unwrap();
        let config = config(songs.path(), songs.path());

        let (scene, report) = SceneTransition::PlaySong(dir)
            .resolve(&config, &SilentBackend, ManualClock::new())
            .unwrap();

        assert!(report.missing_audio);
        assert!(matches!(scene, Scene::Play(session) if session.sheet().len() == 1));
    }

    #[test]
    fn test_open_missing_song_fails() {
        let songs = tempfile::tempdir().unwrap();
        let config = config(songs.path(), songs.path());

        let result = SceneTransition::OpenExistingSong(songs.path().join("nope"))
            .resolve(&config, &SilentBackend, ManualClock::new());
        assert!(result.is_err());
    }
}
