//! The history session: one store, one display mode, one set of tables.
//!
//! [`HistorySession`] owns all mutable history state and is passed to event
//! handlers explicitly. Each operation updates the store first and then
//! brings the caller's [`HistorySurface`] in line with it, either by
//! inserting one row or by rebuilding every table.
//!
//! # Errors
//!
//! Presentation failures never roll back the store. When a category has no
//! view, the entry is still recorded, the failure is logged, and
//! [`HistoryError::MissingView`] is returned.

use std::collections::BTreeMap;

use resetlog_types::{Category, ResetHistoryEntry};
use tracing::{debug, info, warn};

use crate::config::HistorySettings;
use crate::display::{DisplayMode, ToggleIndicator};
use crate::error::HistoryError;
use crate::format::NumberFormat;
use crate::game::GameQueries;
use crate::render::{RenderContext, render_row};
use crate::store::HistoryStore;
use crate::sync::{push_row, rebuild};
use crate::view::HistorySurface;

/// Reset history state for one running game.
#[derive(Debug, Clone)]
pub struct HistorySession<G, N> {
    store: HistoryStore,
    display: DisplayMode,
    game: G,
    numbers: N,
    ms_max_seconds: Option<f64>,
}

impl<G: GameQueries, N: NumberFormat> HistorySession<G, N> {
    /// Start a session with an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`] if `settings.count_max`
    /// is 0.
    pub fn new(settings: &HistorySettings, game: G, numbers: N) -> Result<Self, HistoryError> {
        let store = HistoryStore::new(settings.count_max)?;
        Ok(Self::with_store(store, settings, game, numbers))
    }

    /// Start a session from previously saved entries.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`] if `settings.count_max`
    /// is 0.
    pub fn restore(
        saved: BTreeMap<Category, Vec<ResetHistoryEntry>>,
        settings: &HistorySettings,
        game: G,
        numbers: N,
    ) -> Result<Self, HistoryError> {
        let store = HistoryStore::restore(saved, settings.count_max)?;
        Ok(Self::with_store(store, settings, game, numbers))
    }

    fn with_store(
        store: HistoryStore,
        settings: &HistorySettings,
        game: G,
        numbers: N,
    ) -> Self {
        info!(
            count_max = store.count_max(),
            per_second = settings.show_per_second,
            "history session started"
        );
        Self {
            store,
            display: DisplayMode::new(settings.show_per_second),
            game,
            numbers,
            ms_max_seconds: Some(f64::from(settings.ms_max_seconds)),
        }
    }

    /// Record a reset and show it at the top of its table.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::CategoryMismatch`] if the entry does not
    /// belong to `category` (nothing is recorded), or
    /// [`HistoryError::MissingView`] if `surface` has no table for
    /// `category` (the entry is still recorded).
    pub fn on_reset_event(
        &mut self,
        category: Category,
        entry: ResetHistoryEntry,
        surface: &mut dyn HistorySurface,
    ) -> Result<(), HistoryError> {
        let count_max = self.store.count_max();
        let entry = self.store.add(category, entry).inspect_err(|error| {
            warn!(%category, %error, "rejected reset history entry");
        })?;
        let kind = entry.kind();
        let ctx = render_context(&self.numbers, &self.game, self.display, self.ms_max_seconds);
        let row = render_row(entry, &ctx);

        let Some(view) = surface.view_mut(category) else {
            let error = HistoryError::MissingView { category };
            warn!(%category, %kind, %error, "history entry recorded but not shown");
            return Err(error);
        };
        let pruned = push_row(view, row, count_max);
        debug!(%category, %kind, pruned, "history row added");
        Ok(())
    }

    /// Flip per-second display and rebuild every table.
    ///
    /// # Errors
    ///
    /// Returns the first [`HistoryError::MissingView`] from the rebuild.
    /// The mode is flipped regardless.
    pub fn toggle_per_second(
        &mut self,
        surface: &mut dyn HistorySurface,
    ) -> Result<ToggleIndicator, HistoryError> {
        let per_second = self.display.toggle();
        info!(per_second, "per-second display toggled");
        self.rebuild_all(surface)?;
        Ok(self.display.indicator())
    }

    /// Re-render every category from the store.
    ///
    /// Categories without a view are skipped and logged; the others are
    /// still rebuilt.
    ///
    /// # Errors
    ///
    /// Returns the first [`HistoryError::MissingView`] encountered.
    pub fn rebuild_all(&self, surface: &mut dyn HistorySurface) -> Result<(), HistoryError> {
        let ctx = render_context(&self.numbers, &self.game, self.display, self.ms_max_seconds);
        let mut first_error = None;
        for category in Category::ALL {
            let Some(view) = surface.view_mut(category) else {
                let error = HistoryError::MissingView { category };
                warn!(%category, %error, "skipping history rebuild");
                first_error.get_or_insert(error);
                continue;
            };
            let rows = rebuild(view, self.store.get_all(category), &ctx);
            debug!(%category, rows, "history table rebuilt");
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Change the per-category cap, trim the store, and rebuild every table.
    /// Returns the number of entries evicted.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`] if `count_max` is 0
    /// (nothing changes), or the first [`HistoryError::MissingView`] from
    /// the rebuild.
    pub fn set_history_count_max(
        &mut self,
        count_max: usize,
        surface: &mut dyn HistorySurface,
    ) -> Result<usize, HistoryError> {
        let evicted = self.store.set_count_max(count_max).inspect_err(|error| {
            warn!(count_max, %error, "rejected history cap");
        })?;
        info!(count_max, evicted, "history cap changed");
        self.rebuild_all(surface)?;
        Ok(evicted)
    }

    /// The underlying store, for saving.
    pub const fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// The current display mode.
    pub const fn display(&self) -> DisplayMode {
        self.display
    }

    /// The indicator for the current display mode.
    pub const fn indicator(&self) -> ToggleIndicator {
        self.display.indicator()
    }

    /// The game state consulted while rendering.
    pub const fn game(&self) -> &G {
        &self.game
    }

    /// Mutable access to the game state. Call [`Self::rebuild_all`] after
    /// changes that affect column visibility.
    pub const fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }
}

const fn render_context<'a>(
    numbers: &'a dyn NumberFormat,
    game: &'a dyn GameQueries,
    display: DisplayMode,
    ms_max_seconds: Option<f64>,
) -> RenderContext<'a> {
    RenderContext::new(numbers, game, display.per_second()).with_ms_max_seconds(ms_max_seconds)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;
    use resetlog_types::{BigNumber, PrestigeDetails};

    use super::*;
    use crate::display::Accent;
    use crate::format::ShortNumberFormat;
    use crate::game::StaticGameState;
    use crate::view::TableSet;

    fn settings(count_max: usize) -> HistorySettings {
        HistorySettings {
            count_max,
            ..HistorySettings::default()
        }
    }

    fn session(count_max: usize) -> HistorySession<StaticGameState, ShortNumberFormat> {
        HistorySession::new(&settings(count_max), StaticGameState::new(), ShortNumberFormat)
            .unwrap()
    }

    fn prestige(offerings: f64) -> ResetHistoryEntry {
        ResetHistoryEntry::new(
            DateTime::from_timestamp_millis(0).unwrap(),
            1.0,
            PrestigeDetails {
                offerings: BigNumber::from_f64(offerings),
                diamonds: BigNumber::ZERO,
            },
        )
    }

    #[test]
    fn zero_cap_is_rejected() {
        let result = HistorySession::new(&settings(0), StaticGameState::new(), ShortNumberFormat);
        assert!(matches!(result, Err(HistoryError::InvalidCapacity { requested: 0 })));
    }

    #[test]
    fn reset_event_adds_a_row() {
        let mut session = session(2);
        let mut tables = TableSet::with_all_categories();
        session
            .on_reset_event(Category::Reset, prestige(1.0), &mut tables)
            .unwrap();
        assert_eq!(session.store().len(Category::Reset), 1);
        assert_eq!(tables.view(Category::Reset).map(|v| v.rows().count()), Some(1));
        assert_eq!(tables.view(Category::Ants).map(|v| v.rows().count()), Some(0));
    }

    #[test]
    fn missing_view_still_records_entry() {
        let mut session = session(2);
        let mut tables = TableSet::with_categories([Category::Ascend]);
        let result = session.on_reset_event(Category::Reset, prestige(1.0), &mut tables);
        assert_eq!(
            result,
            Err(HistoryError::MissingView {
                category: Category::Reset
            })
        );
        assert_eq!(session.store().len(Category::Reset), 1);
    }

    #[test]
    fn misrouted_event_touches_nothing() {
        let mut session = session(2);
        let mut tables = TableSet::with_all_categories();
        let result = session.on_reset_event(Category::Ascend, prestige(1.0), &mut tables);
        assert!(matches!(result, Err(HistoryError::CategoryMismatch { .. })));
        assert!(session.store().is_empty());
        assert_eq!(tables.view(Category::Ascend).map(|v| v.rows().count()), Some(0));
    }

    #[test]
    fn toggle_returns_indicator() {
        let mut session = session(2);
        let mut tables = TableSet::with_all_categories();
        let indicator = session.toggle_per_second(&mut tables).unwrap();
        assert_eq!(indicator.label, "Per second: ON");
        assert_eq!(indicator.accent, Accent::Green);
        assert!(session.display().per_second());
        assert_eq!(session.indicator().label, "Per second: ON");
    }

    #[test]
    fn rebuild_continues_past_missing_views() {
        let mut session = session(2);
        let mut full = TableSet::with_all_categories();
        session
            .on_reset_event(Category::Reset, prestige(1.0), &mut full)
            .unwrap();

        let mut partial = TableSet::with_categories([Category::Reset]);
        let result = session.rebuild_all(&mut partial);
        assert_eq!(
            result,
            Err(HistoryError::MissingView {
                category: Category::Ants
            })
        );
        assert_eq!(partial.view(Category::Reset).map(|v| v.rows().count()), Some(1));
    }

    #[test]
    fn invalid_cap_change_keeps_state() {
        let mut session = session(2);
        let mut tables = TableSet::with_all_categories();
        session
            .on_reset_event(Category::Reset, prestige(1.0), &mut tables)
            .unwrap();
        assert!(session.set_history_count_max(0, &mut tables).is_err());
        assert_eq!(session.store().count_max(), 2);
        assert_eq!(session.store().len(Category::Reset), 1);
    }

    #[test]
    fn game_state_is_reachable() {
        let mut session = session(2);
        session.game_mut().complete_challenge(13);
        assert_eq!(session.game().challenge_completions(13), 1);
    }
}
