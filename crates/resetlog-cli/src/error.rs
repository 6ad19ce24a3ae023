//! Error types for the history CLI.
//!
//! [`CliError`] is the top-level error type that wraps all possible
//! failure modes while loading configuration and replaying a stream.

/// Top-level error for the history CLI.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: resetlog_core::config::ConfigError,
    },

    /// The history session rejected an operation.
    #[error("history error: {source}")]
    History {
        /// The underlying history error.
        #[from]
        source: resetlog_core::HistoryError,
    },

    /// Reading the event stream or writing the tables failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A stream line was not a valid command.
    #[error("invalid command on line {line}: {source}")]
    Command {
        /// 1-based line number in the stream.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
