//! Presentation model for history tables.
//!
//! A [`Row`] is an immutable, renderer-agnostic description of one table
//! row. Adapters turn it into DOM nodes, terminal text, or anything else;
//! the core never touches a live UI tree.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::CellRole;

/// An icon with optional hover title, followed by text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Fragment {
    /// Icon asset identifier.
    pub icon: Option<String>,
    /// Hover title (or alt text) for the icon.
    pub title: Option<String>,
    /// Display text after the icon.
    pub text: String,
}

impl Fragment {
    /// A fragment with an icon.
    pub fn icon(icon: &str, title: &str, text: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.to_owned()),
            title: Some(title.to_owned()),
            text: text.into(),
        }
    }

    /// A text-only fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            icon: None,
            title: None,
            text: text.into(),
        }
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Cell {
    /// Which part of the row this cell belongs to.
    pub role: CellRole,
    /// Hover text for the whole cell.
    pub tooltip: Option<String>,
    /// Number of columns this cell spans.
    pub span: u8,
    /// Content, left to right.
    pub fragments: Vec<Fragment>,
}

impl Cell {
    /// A single-column content cell.
    pub const fn new(role: CellRole, fragments: Vec<Fragment>, tooltip: Option<String>) -> Self {
        Self {
            role,
            tooltip,
            span: 1,
            fragments,
        }
    }

    /// An empty cell spanning `span` columns.
    pub const fn filler(span: u8) -> Self {
        Self {
            role: CellRole::Filler,
            tooltip: None,
            span,
            fragments: Vec::new(),
        }
    }

    /// The concatenated text of every fragment.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// One rendered history row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Row {
    /// Cells, left to right.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Wrap a list of cells.
    pub const fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Total columns covered, counting each cell's span.
    pub fn column_count(&self) -> usize {
        self.cells
            .iter()
            .fold(0usize, |acc, c| acc.saturating_add(usize::from(c.span)))
    }

    /// Cells with the given role, in order.
    pub fn cells_with_role(&self, role: CellRole) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(move |c| c.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_sums_spans() {
        let row = Row::new(vec![
            Cell::new(CellRole::Duration, vec![Fragment::text("5s")], None),
            Cell::filler(6),
            Cell::filler(4),
        ]);
        assert_eq!(row.column_count(), 11);
        assert_eq!(row.cells_with_role(CellRole::Filler).count(), 2);
    }

    #[test]
    fn cell_text_joins_fragments() {
        let cell = Cell::new(
            CellRole::Extra,
            vec![
                Fragment::icon("a.png", "A", " 1"),
                Fragment::icon("b.png", "B", " 2"),
            ],
            None,
        );
        assert_eq!(cell.text(), " 1 2");
    }
}
