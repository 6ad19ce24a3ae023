//! The JSON-lines command stream.
//!
//! Each non-blank line is one [`Command`], tagged by `"type"`:
//!
//! ```text
//! {"type":"reset","category":"reset","entry":{"kind":"prestige",...}}
//! {"type":"toggle_per_second"}
//! {"type":"set_history_count_max","value":5}
//! {"type":"complete_challenge","challenge":13}
//! ```
//!
//! Lines starting with `#` are comments.

use std::io::BufRead;

use resetlog_core::format::NumberFormat;
use resetlog_core::game::StaticGameState;
use resetlog_core::session::HistorySession;
use resetlog_core::view::HistorySurface;
use resetlog_types::{Category, ResetHistoryEntry};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::CliError;

/// One instruction from the stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// A reset happened.
    Reset {
        /// The table the entry is delivered to.
        category: Category,
        /// The recorded reset.
        entry: ResetHistoryEntry,
    },
    /// Flip per-second display.
    TogglePerSecond,
    /// Change the per-category cap.
    SetHistoryCountMax {
        /// The new cap.
        value: usize,
    },
    /// Record a challenge completion, which may reveal gain columns.
    CompleteChallenge {
        /// The challenge number.
        challenge: u32,
    },
}

/// Parse one stream line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Counts of what happened while replaying a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Commands applied successfully.
    pub applied: usize,
    /// Lines that could not be parsed.
    pub malformed: usize,
    /// Commands the session rejected.
    pub rejected: usize,
}

/// Apply a single command to the session.
pub fn apply<N: NumberFormat>(
    session: &mut HistorySession<StaticGameState, N>,
    surface: &mut dyn HistorySurface,
    command: Command,
) -> Result<(), CliError> {
    match command {
        Command::Reset { category, entry } => {
            session.on_reset_event(category, entry, surface)?;
        }
        Command::TogglePerSecond => {
            let indicator = session.toggle_per_second(surface)?;
            info!(label = indicator.label, "display mode changed");
        }
        Command::SetHistoryCountMax { value } => {
            session.set_history_count_max(value, surface)?;
        }
        Command::CompleteChallenge { challenge } => {
            let completions = session.game_mut().complete_challenge(challenge);
            info!(challenge, completions, "challenge completed");
            session.rebuild_all(surface)?;
        }
    }
    Ok(())
}

/// Replay every command in `reader`.
///
/// Malformed lines and rejected commands are logged and skipped; only
/// read failures stop the replay.
pub fn replay<R: BufRead, N: NumberFormat>(
    reader: R,
    session: &mut HistorySession<StaticGameState, N>,
    surface: &mut dyn HistorySurface,
) -> Result<ReplaySummary, CliError> {
    let mut summary = ReplaySummary::default();
    for (line, text) in (1usize..).zip(reader.lines()) {
        let text = text?;
        let command = match parse_line(&text) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(source) => {
                let error = CliError::Command { line, source };
                warn!(%error, "skipping malformed line");
                summary.malformed = summary.malformed.saturating_add(1);
                continue;
            }
        };
        if let Err(error) = apply(session, surface, command) {
            warn!(line, %error, "command rejected");
            summary.rejected = summary.rejected.saturating_add(1);
            continue;
        }
        summary.applied = summary.applied.saturating_add(1);
    }
    Ok(summary)
}
