//! Presentation seams.
//!
//! A [`HistoryView`] is one table body, newest row first. A
//! [`HistorySurface`] hands out the view for each category. The embedding
//! UI implements both over its own widgets; [`RowList`] and [`TableSet`]
//! are in-memory implementations used by the CLI and the tests.

use std::collections::{BTreeMap, VecDeque};

use resetlog_types::{Category, Row};

/// A table body that rows are inserted into and pruned from.
pub trait HistoryView {
    /// Remove every row.
    fn clear(&mut self);

    /// Insert `row` above all existing rows.
    fn insert_row_at_front(&mut self, row: Row);

    /// Remove and return the bottom row, if any.
    fn remove_last_row(&mut self) -> Option<Row>;

    /// Add `row` below all existing rows.
    fn append_row(&mut self, row: Row);

    /// Number of rows currently shown.
    fn row_count(&self) -> usize;
}

/// Resolves the table for a category.
pub trait HistorySurface {
    /// The view for `category`, or `None` if it is not wired up.
    fn view_mut(&mut self, category: Category) -> Option<&mut dyn HistoryView>;
}

/// An in-memory table body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowList {
    rows: VecDeque<Row>,
}

impl RowList {
    /// An empty table.
    pub const fn new() -> Self {
        Self {
            rows: VecDeque::new(),
        }
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// The top row.
    pub fn first(&self) -> Option<&Row> {
        self.rows.front()
    }
}

impl HistoryView for RowList {
    fn clear(&mut self) {
        self.rows.clear();
    }

    fn insert_row_at_front(&mut self, row: Row) {
        self.rows.push_front(row);
    }

    fn remove_last_row(&mut self) -> Option<Row> {
        self.rows.pop_back()
    }

    fn append_row(&mut self, row: Row) {
        self.rows.push_back(row);
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// One [`RowList`] per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSet {
    tables: BTreeMap<Category, RowList>,
}

impl TableSet {
    /// A set with no tables wired up.
    pub const fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }

    /// A set with an empty table for every category.
    pub fn with_all_categories() -> Self {
        Self::with_categories(Category::ALL)
    }

    /// A set with an empty table for each of `categories`.
    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            tables: categories
                .into_iter()
                .map(|category| (category, RowList::new()))
                .collect(),
        }
    }

    /// The table for `category`.
    pub fn view(&self, category: Category) -> Option<&RowList> {
        self.tables.get(&category)
    }

    /// Every wired table, in category order.
    pub fn tables(&self) -> impl Iterator<Item = (Category, &RowList)> {
        self.tables.iter().map(|(&category, list)| (category, list))
    }
}

impl HistorySurface for TableSet {
    fn view_mut(&mut self, category: Category) -> Option<&mut dyn HistoryView> {
        self.tables
            .get_mut(&category)
            .map(|list| list as &mut dyn HistoryView)
    }
}
