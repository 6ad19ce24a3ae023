//! The per-category history log.
//!
//! The [`HistoryStore`] holds, for each [`Category`], the most recent reset
//! entries in chronological order (oldest first). It is the authoritative
//! source from which tables are built; a table never holds a row the store
//! has evicted.
//!
//! # Design
//!
//! - **Bounded**: each category holds at most `count_max` entries.
//! - **FIFO**: when full, the oldest entry is evicted before appending.
//! - **Routed**: an entry is only accepted by the category its kind maps to.

use std::collections::{BTreeMap, VecDeque};

use resetlog_types::{Category, ResetHistoryEntry};
use tracing::debug;

use crate::error::HistoryError;

/// Bounded FIFO log of reset entries, one per category.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStore {
    /// Entries per category, oldest first.
    logs: BTreeMap<Category, VecDeque<ResetHistoryEntry>>,
    /// Per-category cap.
    count_max: usize,
}

impl HistoryStore {
    /// Create an empty store holding up to `count_max` entries per category.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`] if `count_max` is 0.
    pub fn new(count_max: usize) -> Result<Self, HistoryError> {
        if count_max == 0 {
            return Err(HistoryError::InvalidCapacity {
                requested: count_max,
            });
        }
        let logs = Category::ALL
            .iter()
            .map(|&category| (category, VecDeque::new()))
            .collect();
        Ok(Self { logs, count_max })
    }

    /// Rebuild a store from previously saved per-category lists.
    ///
    /// Lists are taken oldest first. Entries filed under the wrong category
    /// are dropped, and each list is trimmed to its newest `count_max`
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`] if `count_max` is 0.
    pub fn restore(
        saved: BTreeMap<Category, Vec<ResetHistoryEntry>>,
        count_max: usize,
    ) -> Result<Self, HistoryError> {
        let mut store = Self::new(count_max)?;
        for (category, entries) in saved {
            for entry in entries {
                if let Err(error) = store.add(category, entry) {
                    debug!(%category, %error, "dropping saved history entry");
                }
            }
        }
        Ok(store)
    }

    /// Append `entry` to `category`, evicting the oldest entries while the
    /// log is at its cap. Returns the stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::CategoryMismatch`] if the entry's kind does
    /// not route to `category`; the store is left unchanged.
    pub fn add(
        &mut self,
        category: Category,
        entry: ResetHistoryEntry,
    ) -> Result<&ResetHistoryEntry, HistoryError> {
        let expected = entry.category();
        if expected != category {
            return Err(HistoryError::CategoryMismatch {
                category,
                kind: entry.kind(),
                expected,
            });
        }

        let count_max = self.count_max;
        let log = self.logs.entry(category).or_default();
        while log.len() >= count_max {
            if let Some(evicted) = log.pop_front() {
                debug!(%category, kind = %evicted.kind(), "evicted oldest history entry");
            }
        }
        log.push_back(entry);
        log.back()
            .ok_or(HistoryError::Internal("history log empty after append"))
    }

    /// Entries of `category`, oldest first. Reverse for newest first.
    pub fn get_all(
        &self,
        category: Category,
    ) -> impl DoubleEndedIterator<Item = &ResetHistoryEntry> {
        self.logs.get(&category).into_iter().flatten()
    }

    /// The most recent entry of `category`.
    pub fn latest(&self, category: Category) -> Option<&ResetHistoryEntry> {
        self.logs.get(&category).and_then(VecDeque::back)
    }

    /// Number of entries held for `category`.
    pub fn len(&self, category: Category) -> usize {
        self.logs.get(&category).map_or(0, VecDeque::len)
    }

    /// Categories with an initialized log, in order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.logs.keys().copied()
    }

    /// Whether every category is empty.
    pub fn is_empty(&self) -> bool {
        self.logs.values().all(VecDeque::is_empty)
    }

    /// The per-category cap.
    pub const fn count_max(&self) -> usize {
        self.count_max
    }

    /// Change the cap, trimming the oldest entries of any category that now
    /// exceeds it. Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`] if `count_max` is 0.
    pub fn set_count_max(&mut self, count_max: usize) -> Result<usize, HistoryError> {
        if count_max == 0 {
            return Err(HistoryError::InvalidCapacity {
                requested: count_max,
            });
        }
        self.count_max = count_max;
        let mut removed = 0usize;
        for log in self.logs.values_mut() {
            let excess = log.len().saturating_sub(count_max);
            log.drain(..excess);
            removed = removed.saturating_add(excess);
        }
        Ok(removed)
    }

    /// A snapshot of every category, oldest first, for persistence.
    pub fn to_save(&self) -> BTreeMap<Category, Vec<ResetHistoryEntry>> {
        self.logs
            .iter()
            .map(|(&category, log)| (category, log.iter().cloned().collect()))
            .collect()
    }
}
