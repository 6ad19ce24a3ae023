//! Error types for the `resetlog-core` crate.
//!
//! Every failure here is a local wiring or configuration bug in a trusted,
//! single-process context. Errors abort the offending operation and leave
//! stored history intact.

use resetlog_types::{Category, Kind};

/// Errors raised while recording or rendering history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// The history cap must allow at least one entry.
    #[error("history count max must be at least 1, got {requested}")]
    InvalidCapacity {
        /// The rejected cap.
        requested: usize,
    },

    /// An entry was delivered to a category its kind does not route to.
    #[error("{kind} entries belong to the {expected} table, not {category}")]
    CategoryMismatch {
        /// The category the entry was delivered to.
        category: Category,
        /// The entry's kind.
        kind: Kind,
        /// The category the kind routes to.
        expected: Category,
    },

    /// No presentation view is wired up for a category.
    #[error("no history view registered for category {category}")]
    MissingView {
        /// The category without a view.
        category: Category,
    },

    /// An internal error that should not occur in normal operation.
    #[error("internal history error: {0}")]
    Internal(&'static str),
}
