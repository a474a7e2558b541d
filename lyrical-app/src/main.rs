mod player;

use clap::{Parser, Subcommand};
use lyrical_core::library::list_importable;
use lyrical_core::{
    CoreError, LyricalConfig, Metadata, MetadataField, Scene, SceneTransition, SilentBackend,
    SongLibrary, SystemClock,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Defaults to `list`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List songs and files waiting to be imported
    List,
    /// Play a song, printing each line as it becomes active
    Play {
        /// Song directory, or its name inside the songs folder
        song: String,
        /// Start from the song's preview point
        #[arg(long)]
        preview: bool,
    },
    /// Turn a file in the import folder into a song
    Import {
        /// File name inside the import folder
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Check config for logging.enabled before full config load
    let file_logging_enabled = check_file_logging_enabled();
    init_tracing(file_logging_enabled);

    // Load config or create template on first run
    let config = match LyricalConfig::load_or_create() {
        Ok(config) => config,
        Err(CoreError::ConfigNotFound { path }) => {
            println!(
                "Created a new config file at {}. Review it and run lyrical again.",
                path.display()
            );
            std::process::exit(0);
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Command::List) {
        Command::List => list(&config),
        Command::Import { file } => import(&config, file),
        Command::Play { song, preview } => play(&config, &song, preview),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

fn list(config: &LyricalConfig) -> Result<(), CoreError> {
    let library = SongLibrary::open(&config.library.songs_dir)?;
    println!("Songs in {}:", library.root().display());
    for (dir, metadata) in library.songs() {
        let name = dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        print!("{}", describe_song(&name, metadata));
    }
    if library.is_empty() {
        println!("  (none)");
    }

    let importable = list_importable(&config.library.import_dir)?;
    if !importable.is_empty() {
        println!("Ready to import from {}:", config.library.import_dir.display());
        for name in importable {
            println!("  {name}");
        }
    }
    Ok(())
}

/// One song's entry in the library listing
fn describe_song(name: &str, metadata: &Metadata) -> String {
    let mut out = format!("  {name}\n");
    for field in MetadataField::ALL {
        out.push_str(&format!("    {}: {}\n", field.label(), metadata.field(field)));
    }
    out.push_str(&format!("    Length: {}s\n", metadata.length_secs));
    out
}

fn import(config: &LyricalConfig, file: String) -> Result<(), CoreError> {
    let (scene, report) =
        SceneTransition::ImportNewSong(file).resolve(config, &SilentBackend, SystemClock)?;
    if report.missing_audio {
        warn!("Imported audio could not be found after the move");
    }
    if let Scene::Edit(edit) = scene {
        println!("Created {}", edit.session().dir().display());
    }
    Ok(())
}

fn play(config: &LyricalConfig, song: &str, preview: bool) -> Result<(), CoreError> {
    let dir = resolve_song_dir(&config.library.songs_dir, song);
    let (scene, report) =
        SceneTransition::PlaySong(dir).resolve(config, &SilentBackend, SystemClock)?;
    for warning in &report.warnings {
        warn!("{warning}");
    }
    let Scene::Play(session) = scene else {
        return Ok(());
    };

    let start_ms = if preview {
        session.sheet().metadata.preview_timestamp_ms
    } else {
        0
    };

    // Create cancellation token for Ctrl+C
    let cancel_token = CancellationToken::new();
    let ctrlc_token = cancel_token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C, stopping playback...");
        ctrlc_token.cancel();
    }) {
        error!("Failed to set Ctrl+C handler: {}", e);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(player::run(
        session,
        config.playback.frame_rate,
        start_ms,
        cancel_token,
    ))
}

/// Accept either a path to a song directory or a directory name inside the
/// songs root
fn resolve_song_dir(songs_dir: &Path, song: &str) -> PathBuf {
    let direct = PathBuf::from(song);
    if direct.is_dir() {
        direct
    } else {
        songs_dir.join(song)
    }
}

/// Check if file logging is enabled by reading the config file.
/// This is done before full config loading to set up tracing first.
/// Returns `false` if config doesn't exist or can't be parsed.
fn check_file_logging_enabled() -> bool {
    // Minimal structs to parse just the logging.enabled field
    #[derive(serde::Deserialize)]
    struct PartialConfig {
        #[serde(default)]
        logging: PartialLoggingConfig,
    }
    #[derive(serde::Deserialize, Default)]
    struct PartialLoggingConfig {
        #[serde(default)]
        enabled: bool,
    }

    let Ok(content) = std::fs::read_to_string(LyricalConfig::config_path()) else {
        return false;
    };

    toml::from_str::<PartialConfig>(&content)
        .map(|c| c.logging.enabled)
        .unwrap_or(false)
}

/// Initialize tracing with console output and optional file logging
fn init_tracing(file_logging_enabled: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so lyric output on stdout stays clean
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if file_logging_enabled {
        let log_path = lyrical_core::paths::log_file_path();

        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match File::create(&log_path) {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .with(file_layer)
                    .init();

                return;
            }
            Err(e) => {
                eprintln!("Failed to create log file at {}: {e}", log_path.display());
            }
        }
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
