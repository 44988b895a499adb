//! Replay Inspector - command line entry point
//!
//! Loads a parsed session recording, resolves a navigation signal to an
//! inspection view and prints that view's payload as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Default (performance) view
//! replay-inspector replay.json
//!
//! # Memory view with the playhead at 1.5s and a hover at 2s
//! replay-inspector replay.json --tab '#memory' --current-time 1500 --hover-time 2000
//!
//! # Signals can be full locations
//! replay-inspector replay.json --tab 'https://example.com/replays/abc/#console'
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use replay_inspector::analysis::DefaultClassifier;
use replay_inspector::config::{config_path, InspectorConfig, LoggingSettings};
use replay_inspector::frontend::fragment_of;
use replay_inspector::session::CursorUpdate;
use replay_inspector::{InspectorApp, PanelAction, SessionRecord};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the configured log directory
const LOG_FILE_NAME: &str = "replay-inspector.log";

/// Replay Inspector - inspect one view of a recorded session
#[derive(Parser, Debug)]
#[command(name = "replay-inspector")]
#[command(about = "Resolve a session replay view and print its data")]
#[command(version)]
struct Cli {
    /// Recording file (JSON with `event` and `entries`)
    recording: PathBuf,

    /// Navigation signal: a view name, a `#fragment` or a full location
    #[arg(short, long, default_value = "")]
    tab: String,

    /// Playhead position in ms from session start
    #[arg(long)]
    current_time: Option<f64>,

    /// Hover position in ms from session start
    #[arg(long)]
    hover_time: Option<f64>,

    /// Config file (defaults to $REPLAY_INSPECTOR_CONFIG or the app data dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print compact JSON regardless of config
    #[arg(long)]
    compact: bool,
}

fn init_logging(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    let (file_layer, guard) = match &settings.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_file = config_path(cli.config.as_deref());
    let config = InspectorConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&config.logging);

    // logging only exists once the config is read
    match config_file.filter(|path| path.exists()) {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::debug!("No config file, using defaults"),
    }

    let record = SessionRecord::load_from_file(&cli.recording)
        .with_context(|| format!("Failed to load recording {}", cli.recording.display()))?;

    let classifier = DefaultClassifier::from_settings(&config.classifier);
    let mut app = InspectorApp::new(record, classifier, fragment_of(&cli.tab));

    let mut actions = Vec::new();
    if let Some(time) = cli.current_time {
        actions.push(PanelAction::Cursor(CursorUpdate::Seek(time)));
    }
    if let Some(time) = cli.hover_time {
        actions.push(PanelAction::Cursor(CursorUpdate::Hover(Some(time))));
    }
    let view = app.handle_actions(actions);

    let output = if config.output.pretty && !cli.compact {
        serde_json::to_string_pretty(view)?
    } else {
        serde_json::to_string(view)?
    };
    println!("{}", output);

    Ok(())
}
