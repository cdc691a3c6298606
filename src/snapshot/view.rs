//! Condensed table views for downstream payloads
//!
//! Tables above a row limit are reduced to head/tail samples so that
//! narrative payloads stay bounded.

use serde::{Deserialize, Serialize};

use super::Snapshot;

/// Row limits for table views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLimits {
    /// Tables with at most this many rows are sent in full
    pub max_full_rows: usize,
    /// Rows kept from each end of a condensed table
    pub sample_rows: usize,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            max_full_rows: 10,
            sample_rows: 3,
        }
    }
}

/// A table as it is handed to a collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableView {
    /// Full table contents
    Full(Snapshot),
    /// Head/tail sample of a large table
    Condensed {
        id: String,
        columns: Vec<String>,
        row_count: usize,
        head: Vec<Vec<Option<String>>>,
        tail: Vec<Vec<Option<String>>>,
    },
}

impl TableView {
    /// Build the view of a snapshot under the given limits
    pub fn of(snapshot: &Snapshot, limits: ViewLimits) -> Self {
        let rows = snapshot.row_count();
        if rows <= limits.max_full_rows {
            return TableView::Full(snapshot.clone());
        }

        let sample = limits.sample_rows.min(rows);
        TableView::Condensed {
            id: snapshot.id.clone(),
            columns: snapshot.column_names().map(String::from).collect(),
            row_count: rows,
            head: snapshot.slice_rows(0, sample),
            tail: snapshot.slice_rows(rows - sample, rows),
        }
    }

    /// Render as plain text for prompts and logs
    pub fn render(&self) -> String {
        match self {
            TableView::Full(snapshot) => {
                let mut out = format!(
                    "{}:\n{}\n",
                    snapshot.id,
                    snapshot.column_names().collect::<Vec<_>>().join(" | ")
                );
                for row in snapshot.slice_rows(0, snapshot.row_count()) {
                    out.push_str(&render_row(&row));
                    out.push('\n');
                }
                out
            }
            TableView::Condensed {
                id,
                columns,
                row_count,
                head,
                tail,
            } => {
                let mut out = format!("{} ({} rows):\nColumns: {}\n", id, row_count, columns.join(" | "));
                out.push_str(&format!("First {} rows:\n", head.len()));
                for row in head {
                    out.push_str(&render_row(row));
                    out.push('\n');
                }
                out.push_str(&format!("Last {} rows:\n", tail.len()));
                for row in tail {
                    out.push_str(&render_row(row));
                    out.push('\n');
                }
                out
            }
        }
    }
}

fn render_row(row: &[Option<String>]) -> String {
    row.iter()
        .map(|cell| cell.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" | ")
}
