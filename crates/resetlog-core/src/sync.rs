//! Keeping a table in step with the store.
//!
//! Two paths produce the same table: [`push_row`] after each new entry, or
//! [`rebuild`] from scratch. Both leave the newest entry on top and at most
//! `count_max` rows.

use resetlog_types::{ResetHistoryEntry, Row};
use tracing::trace;

use crate::render::{RenderContext, render_row};
use crate::view::HistoryView;

/// Insert `row` at the top of `view`, then drop bottom rows until at most
/// `count_max` remain. Returns the number of rows removed.
pub fn push_row(view: &mut dyn HistoryView, row: Row, count_max: usize) -> usize {
    view.insert_row_at_front(row);
    let mut removed = 0usize;
    while view.row_count() > count_max {
        if view.remove_last_row().is_none() {
            break;
        }
        removed = removed.saturating_add(1);
    }
    if removed > 0 {
        trace!(removed, count_max, "pruned history rows");
    }
    removed
}

/// Clear `view` and re-render `entries` into it.
///
/// `entries` are given oldest first, as the store holds them; rows are
/// appended newest first.
pub fn rebuild<'e, I>(view: &mut dyn HistoryView, entries: I, ctx: &RenderContext<'_>) -> usize
where
    I: DoubleEndedIterator<Item = &'e ResetHistoryEntry>,
{
    view.clear();
    let mut rendered = 0usize;
    for entry in entries.rev() {
        view.append_row(render_row(entry, ctx));
        rendered = rendered.saturating_add(1);
    }
    rendered
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;
    use resetlog_types::{BigNumber, Category, PrestigeDetails};

    use super::*;
    use crate::format::ShortNumberFormat;
    use crate::game::StaticGameState;
    use crate::store::HistoryStore;
    use crate::view::RowList;

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
    fn push_prunes_to_cap() {
        let game = StaticGameState::new();
        let ctx = RenderContext::new(&ShortNumberFormat, &game, false);
        let mut list = RowList::new();
        assert_eq!(push_row(&mut list, render_row(&prestige(1.0), &ctx), 2), 0);
        assert_eq!(push_row(&mut list, render_row(&prestige(2.0), &ctx), 2), 0);
        assert_eq!(push_row(&mut list, render_row(&prestige(3.0), &ctx), 2), 1);
        assert_eq!(list.row_count(), 2);
        assert_eq!(list.first(), Some(&render_row(&prestige(3.0), &ctx)));
    }

    #[test]
    fn incremental_and_rebuild_agree() {
        let game = StaticGameState::new();
        let ctx = RenderContext::new(&ShortNumberFormat, &game, false);
        let mut store = HistoryStore::new(3).unwrap();
        let mut incremental = RowList::new();

        for i in 1..=5 {
            let entry = store.add(Category::Reset, prestige(f64::from(i))).unwrap();
            let row = render_row(entry, &ctx);
            push_row(&mut incremental, row, store.count_max());
        }

        let mut rebuilt = RowList::new();
        let rendered = rebuild(&mut rebuilt, store.get_all(Category::Reset), &ctx);
        assert_eq!(rendered, 3);
        assert_eq!(incremental, rebuilt);
        assert_eq!(
            rebuilt.first().map(|r| r.cells.get(1).map(resetlog_types::Cell::text)),
            Some(Some("5".to_owned()))
        );
    }

    #[test]
    fn rebuild_replaces_previous_rows() {
        let game = StaticGameState::new();
        let ctx = RenderContext::new(&ShortNumberFormat, &game, false);
        let mut list = RowList::new();
        let entries = [prestige(1.0), prestige(2.0)];
        rebuild(&mut list, entries.iter(), &ctx);
        rebuild(&mut list, entries.iter(), &ctx);
        assert_eq!(list.row_count(), 2);
    }
}
