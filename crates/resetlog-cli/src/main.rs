//! History CLI: replays reset events into history tables.
//!
//! Reads a JSON-lines stream of commands from a file (first argument) or
//! standard input, applies them to a [`HistorySession`], and prints every
//! category table as aligned text when the stream ends.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `RESETLOG_CONFIG` or `resetlog-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Create the session and its tables
//! 4. Replay the command stream
//! 5. Print the tables
//!
//! [`HistorySession`]: resetlog_core::session::HistorySession

mod error;
mod stream;
mod text;

use std::fs::File;
use std::io::{self, BufReader, Write as _};
use std::path::{Path, PathBuf};

use resetlog_core::config::HistoryConfig;
use resetlog_core::format::ShortNumberFormat;
use resetlog_core::game::StaticGameState;
use resetlog_core::session::HistorySession;
use resetlog_core::view::TableSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "RESETLOG_CONFIG";

/// Config file used when `RESETLOG_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "resetlog-config.yaml";

/// Application entry point for the history CLI.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the stream cannot be
/// read, or the tables cannot be written.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so the fallback to
    //    defaults is reported once the subscriber exists.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    info!("resetlog-cli starting");
    let source = config_path
        .as_deref()
        .map_or_else(|| "defaults".to_owned(), |path| path.display().to_string());
    info!(source, "Configuration loaded");
    info!(
        count_max = config.history.count_max,
        show_per_second = config.history.show_per_second,
        ms_max_seconds = config.history.ms_max_seconds,
        "History settings"
    );

    // 3. Create the session and wire a table for every category.
    let mut session =
        HistorySession::new(&config.history, StaticGameState::new(), ShortNumberFormat)?;
    let mut tables = TableSet::with_all_categories();
    session.rebuild_all(&mut tables)?;

    // 4. Replay the stream.
    let summary = match std::env::args_os().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            info!(path = %path.display(), "Reading commands from file");
            let file = File::open(&path)?;
            stream::replay(BufReader::new(file), &mut session, &mut tables)?
        }
        None => {
            info!("Reading commands from stdin");
            stream::replay(io::stdin().lock(), &mut session, &mut tables)?
        }
    };
    info!(
        applied = summary.applied,
        malformed = summary.malformed,
        rejected = summary.rejected,
        "Stream replayed"
    );

    // 5. Print the tables.
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", session.indicator().label)?;
    stdout.write_all(text::render_tables(&tables).as_bytes())?;
    stdout.flush()?;

    Ok(())
}

/// Load configuration from `RESETLOG_CONFIG` or `resetlog-config.yaml`.
///
/// A missing default file means defaults; a missing file named by
/// `RESETLOG_CONFIG` is an error. Returns the path that was read, if any.
fn load_config() -> Result<(HistoryConfig, Option<PathBuf>), CliError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(path);
        let config = HistoryConfig::from_file(&path)?;
        return Ok((config, Some(path)));
    }

    let config_path = Path::new(DEFAULT_CONFIG_PATH);
    if config_path.exists() {
        let config = HistoryConfig::from_file(config_path)?;
        Ok((config, Some(config_path.to_path_buf())))
    } else {
        Ok((HistoryConfig::parse("")?, None))
    }
}
