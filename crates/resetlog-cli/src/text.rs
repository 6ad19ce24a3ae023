//! Plain-text rendering of history tables.
//!
//! Every row is expanded to its full column count, fillers becoming empty
//! columns, and columns are padded to a common width per table.

use std::fmt::Write as _;

use resetlog_core::view::{RowList, TableSet};
use resetlog_types::{Cell, CellRole, Row};

const SEPARATOR: &str = " | ";

/// Render every table in `tables`, in category order.
pub fn render_tables(tables: &TableSet) -> String {
    let mut out = String::new();
    for (category, list) in tables.tables() {
        let _ = writeln!(out, "== {category} ({} rows) ==", list.rows().count());
        out.push_str(&render_table(list));
        out.push('\n');
    }
    out
}

/// Render one table as aligned lines, top row first.
pub fn render_table(list: &RowList) -> String {
    let grid: Vec<Vec<String>> = list.rows().map(columns).collect();
    if grid.is_empty() {
        return "(empty)\n".to_owned();
    }

    let width_count = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; width_count];
    for line in &grid {
        for (width, column) in widths.iter_mut().zip(line) {
            *width = (*width).max(column.chars().count());
        }
    }

    let mut out = String::new();
    for line in &grid {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(column, &width)| format!("{column:<width$}"))
            .collect();
        out.push_str(padded.join(SEPARATOR).trim_end());
        out.push('\n');
    }
    out
}

/// One string per column the row spans.
fn columns(row: &Row) -> Vec<String> {
    let mut out = Vec::with_capacity(row.column_count());
    for cell in &row.cells {
        if cell.role == CellRole::Filler {
            out.extend(std::iter::repeat_n(String::new(), usize::from(cell.span)));
        } else {
            out.push(cell_text(cell));
        }
    }
    out
}

/// Extra fragments are labeled with their titles. The duration cell is
/// prefixed with its tooltip, the local timestamp.
fn cell_text(cell: &Cell) -> String {
    if cell.role == CellRole::Duration {
        if let Some(when) = &cell.tooltip {
            return format!("{when} {}", cell.text());
        }
        return cell.text();
    }
    cell.fragments
        .iter()
        .map(|fragment| match &fragment.title {
            Some(title) if cell.role == CellRole::Extra => {
                format!("{title}:{}", fragment.text.trim_start())
            }
            _ => fragment.text.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
