//! Row rendering.
//!
//! [`render_row`] turns one [`ResetHistoryEntry`] into a [`Row`]. Rows
//! always span [`ROW_COLUMNS`] columns: gains are padded up to
//! [`GAIN_COLUMN_BUDGET`] and extras up to [`EXTRA_COLUMN_BUDGET`], so a
//! table stays aligned as the player unlocks new gain columns.
//!
//! # Layout
//!
//! ```text
//! | duration | gain x n | filler (6 - n) | extra x k | filler (4 - k) |
//! ```

use chrono::Local;
use resetlog_types::{Cell, CellRole, Fragment, Kind, ResetHistoryEntry, Row};
use tracing::warn;

use crate::extras::build_extras;
use crate::format::NumberFormat;
use crate::game::GameQueries;
use crate::registry::GAIN_FORMATTERS;

/// Columns taken by the leading duration cell.
pub const DURATION_COLUMNS: usize = 1;

/// Columns reserved for gain cells.
pub const GAIN_COLUMN_BUDGET: usize = 6;

/// Columns reserved for kind-specific extra cells.
pub const EXTRA_COLUMN_BUDGET: usize = 4;

/// Total columns spanned by every rendered row.
pub const ROW_COLUMNS: usize = DURATION_COLUMNS + GAIN_COLUMN_BUDGET + EXTRA_COLUMN_BUDGET;

/// Default threshold below which durations show milliseconds.
pub const DEFAULT_MS_MAX_SECONDS: f64 = 60.0;

/// Everything a formatter may consult besides the entry itself.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Shared number formatter.
    pub numbers: &'a dyn NumberFormat,
    /// Live game state.
    pub game: &'a dyn GameQueries,
    /// Whether rate-conditional gains are shown per second.
    pub per_second: bool,
    /// Durations shorter than this show milliseconds.
    pub ms_max_seconds: Option<f64>,
}

impl<'a> RenderContext<'a> {
    /// A context with the default millisecond threshold.
    pub const fn new(
        numbers: &'a dyn NumberFormat,
        game: &'a dyn GameQueries,
        per_second: bool,
    ) -> Self {
        Self {
            numbers,
            game,
            per_second,
            ms_max_seconds: Some(DEFAULT_MS_MAX_SECONDS),
        }
    }

    /// Override the millisecond threshold.
    #[must_use]
    pub const fn with_ms_max_seconds(mut self, ms_max_seconds: Option<f64>) -> Self {
        self.ms_max_seconds = ms_max_seconds;
        self
    }
}

impl core::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderContext")
            .field("per_second", &self.per_second)
            .field("ms_max_seconds", &self.ms_max_seconds)
            .finish_non_exhaustive()
    }
}

/// Icon shown in the duration cell for each kind.
pub const fn kind_icon(kind: Kind) -> &'static str {
    match kind {
        Kind::AntSacrifice => "Pictures/AntSacrifice.png",
        Kind::Prestige => "Pictures/Transparent Pics/Prestige.png",
        Kind::Transcend => "Pictures/Transparent Pics/Transcend.png",
        Kind::Reincarnate => "Pictures/Transparent Pics/Reincarnate.png",
        Kind::Ascend => "Pictures/questionable.png",
    }
}

/// Render one entry as a full-width row.
pub fn render_row(entry: &ResetHistoryEntry, ctx: &RenderContext<'_>) -> Row {
    let gains = gain_cells(entry, ctx);
    let extras = build_extras(entry, ctx);
    let gain_padding = padding(entry.kind(), "gain", gains.len(), GAIN_COLUMN_BUDGET);
    let extra_padding = padding(entry.kind(), "extra", extras.len(), EXTRA_COLUMN_BUDGET);

    let mut cells = Vec::with_capacity(gains.len().saturating_add(extras.len()).saturating_add(3));
    cells.push(duration_cell(entry, ctx));
    cells.extend(gains);
    cells.extend(gain_padding);
    cells.extend(extras);
    cells.extend(extra_padding);
    Row::new(cells)
}

/// One cell per gain the entry carries, is visible, and is registered.
pub fn gain_cells(entry: &ResetHistoryEntry, ctx: &RenderContext<'_>) -> Vec<Cell> {
    GAIN_FORMATTERS
        .iter()
        .filter_map(|formatter| {
            let value = entry.gain(formatter.field)?;
            if !formatter.is_visible(entry, ctx) {
                return None;
            }
            Some(Cell::new(
                CellRole::Gain,
                vec![Fragment::icon(
                    formatter.icon,
                    formatter.title,
                    (formatter.format)(value, entry, ctx),
                )],
                None,
            ))
        })
        .collect()
}

fn duration_cell(entry: &ResetHistoryEntry, ctx: &RenderContext<'_>) -> Cell {
    let local = entry.date.with_timezone(&Local);
    Cell::new(
        CellRole::Duration,
        vec![Fragment {
            icon: Some(kind_icon(entry.kind()).to_owned()),
            title: None,
            text: crate::duration::format_time_short(entry.seconds, ctx.ms_max_seconds),
        }],
        Some(local.format("%Y-%m-%d %H:%M:%S").to_string()),
    )
}

/// A filler covering the unused part of a column budget, if any.
fn padding(kind: Kind, section: &'static str, used: usize, budget: usize) -> Option<Cell> {
    if used > budget {
        warn!(%kind, section, used, budget, "history row exceeds its column budget");
    }
    let span = budget.saturating_sub(used);
    if span == 0 {
        return None;
    }
    Some(Cell::filler(u8::try_from(span).unwrap_or(u8::MAX)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;
    use resetlog_types::{
        AntSacrificeDetails, AscendDetails, BigNumber, EntryDetails, GainField, PrestigeDetails,
        ReincarnateDetails, TranscendDetails,
    };

    use super::*;
    use crate::format::ShortNumberFormat;
    use crate::game::StaticGameState;

    fn entry(seconds: f64, details: impl Into<EntryDetails>) -> ResetHistoryEntry {
        ResetHistoryEntry::new(
            DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
            seconds,
            details,
        )
    }

    fn n(v: f64) -> BigNumber {
        BigNumber::from_f64(v)
    }

    fn every_kind() -> Vec<ResetHistoryEntry> {
        vec![
            entry(
                30.0,
                AntSacrificeDetails {
                    ant_sacrifice_points_after: 20.0,
                    ant_sacrifice_points_before: 10.0,
                    base_elo: 100.0,
                    crumbs: n(1e7),
                    crumbs_per_second: n(10.0),
                    effective_elo: 150.0,
                    obtainium: n(2.0),
                    offerings: n(3.0),
                },
            ),
            entry(1.0, PrestigeDetails { offerings: n(1.0), diamonds: n(2.0) }),
            entry(2.0, TranscendDetails { offerings: n(1.0), mythos: n(2.0) }),
            entry(
                3.0,
                ReincarnateDetails {
                    offerings: n(1.0),
                    particles: n(2.0),
                    obtainium: n(3.0),
                },
            ),
            entry(
                5.0,
                AscendDetails {
                    c10_completions: 1,
                    used_corruptions: vec![None, Some(3)],
                    corruption_score: 100.0,
                    wow_cubes: n(10.0),
                    wow_tesseracts: n(5.0),
                    wow_hypercubes: n(1.0),
                    wow_platonic_cubes: n(1.0),
                    current_challenge: None,
                },
            ),
        ]
    }

    #[test]
    fn every_row_spans_the_full_width() {
        let locked = StaticGameState::new();
        let unlocked: StaticGameState = [(13, 1), (14, 1)].into_iter().collect();
        for game in [&locked, &unlocked] {
            for per_second in [false, true] {
                let ctx = RenderContext::new(&ShortNumberFormat, game, per_second);
                for e in every_kind() {
                    let row = render_row(&e, &ctx);
                    assert_eq!(row.column_count(), ROW_COLUMNS, "{:?}", e.kind());
                    assert_eq!(row.column_count(), 11);
                }
            }
        }
    }

    #[test]
    fn leading_cell_shows_kind_and_duration() {
        let game = StaticGameState::new();
        let ctx = RenderContext::new(&ShortNumberFormat, &game, false);
        let e = entry(65.0, PrestigeDetails { offerings: n(1.0), diamonds: n(2.0) });
        let row = render_row(&e, &ctx);
        let first = row.cells.first().unwrap();

        assert_eq!(first.role, CellRole::Duration);
        assert_eq!(first.text(), "1m5s");
        assert_eq!(
            first.fragments.first().and_then(|f| f.icon.as_deref()),
            Some("Pictures/Transparent Pics/Prestige.png")
        );
        assert!(first.tooltip.as_deref().is_some_and(|t| !t.is_empty()));
    }

    #[test]
    fn gains_follow_registry_order() {
        let game = StaticGameState::new();
        let ctx = RenderContext::new(&ShortNumberFormat, &game, false);
        let e = entry(
            3.0,
            ReincarnateDetails {
                offerings: n(1.0),
                particles: n(2.0),
                obtainium: n(3.0),
            },
        );
        let titles: Vec<String> = gain_cells(&e, &ctx)
            .iter()
            .filter_map(|c| c.fragments.first().and_then(|f| f.title.clone()))
            .collect();
        // Obtainium precedes particles in the registry, whatever the struct order.
        assert_eq!(titles, vec!["Offerings", "Obtainium", "Particles"]);
    }

    #[test]
    fn locked_cube_columns_are_padded_not_rendered() {
        let e = every_kind().pop().unwrap();
        assert!(e.gain(GainField::WowHypercubes).is_some());

        let locked = StaticGameState::new();
        let ctx = RenderContext::new(&ShortNumberFormat, &locked, false);
        let row = render_row(&e, &ctx);
        assert_eq!(row.cells_with_role(CellRole::Gain).count(), 2);
        assert_eq!(
            row.cells_with_role(CellRole::Filler).next().map(|c| c.span),
            Some(4)
        );

        let unlocked: StaticGameState = [(13, 1), (14, 1)].into_iter().collect();
        let ctx = RenderContext::new(&ShortNumberFormat, &unlocked, false);
        let row = render_row(&e, &ctx);
        assert_eq!(row.cells_with_role(CellRole::Gain).count(), 4);
    }

    #[test]
    fn ascend_cube_cell_renders_rate() {
        let game = StaticGameState::new();
        let ctx = RenderContext::new(&ShortNumberFormat, &game, true);
        let e = every_kind().pop().unwrap();
        let row = render_row(&e, &ctx);
        let cube = row
            .cells_with_role(CellRole::Gain)
            .find(|c| c.fragments.first().and_then(|f| f.title.as_deref()) == Some("Wow! Cubes"))
            .unwrap();
        assert_eq!(cube.text(), "2.000/s");
    }

    #[test]
    fn fillers_close_each_section() {
        let game = StaticGameState::new();
        let ctx = RenderContext::new(&ShortNumberFormat, &game, false);
        let e = entry(1.0, PrestigeDetails { offerings: n(1.0), diamonds: n(2.0) });
        let roles: Vec<(CellRole, u8)> = render_row(&e, &ctx)
            .cells
            .iter()
            .map(|c| (c.role, c.span))
            .collect();
        assert_eq!(
            roles,
            vec![
                (CellRole::Duration, 1),
                (CellRole::Gain, 1),
                (CellRole::Gain, 1),
                (CellRole::Filler, 4),
                (CellRole::Filler, 4),
            ]
        );
    }
}
