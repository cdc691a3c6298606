//! Snapshot types
//!
//! A snapshot is one tabular extraction of a market's state: an ordered list
//! of named columns, each holding the raw cell text for every row.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder the odds pages print for a suspended or unavailable price
pub const PLACEHOLDER: &str = "-";

/// A single named column of raw cell values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column header as scraped
    pub name: String,
    /// Raw cell text in row order; `None` is a missing cell
    #[serde(deserialize_with = "deserialize_cells")]
    pub values: Vec<Option<String>>,
}

impl Column {
    /// Create a column from raw values
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Iterate the cells that carry usable text: present, non-blank and not
    /// the placeholder. Yields trimmed slices.
    pub fn usable_values(&self) -> impl Iterator<Item = &str> + '_ {
        self.values
            .iter()
            .filter_map(|v| v.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty() && *v != PLACEHOLDER)
    }

    /// First present, non-blank cell (which may be the placeholder)
    pub fn first_present(&self) -> Option<&str> {
        self.values
            .iter()
            .filter_map(|v| v.as_deref())
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    /// Number of cells equal to the placeholder
    pub fn placeholder_count(&self) -> usize {
        self.values
            .iter()
            .filter(|v| v.as_deref().map(str::trim) == Some(PLACEHOLDER))
            .count()
    }
}

/// One tabular odds snapshot for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Identifier used to key baseline odds (e.g. `table_1`)
    #[serde(default)]
    pub id: String,
    /// Columns in page order
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column of textual values. Empty strings behave as missing cells.
    pub fn with_column<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(|v| Some(v.into())).collect();
        self.columns.push(Column::new(name, values));
        self
    }

    /// Append a column that may contain missing cells
    pub fn with_cells(mut self, name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        self.columns.push(Column::new(name, values));
        self
    }

    /// Look up a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether a column with this exact name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in page order
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// First column whose name contains "drop" (case-insensitive)
    pub fn drop_column(&self) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.to_lowercase().contains("drop"))
    }

    /// Number of rows (the longest column)
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.values.len()).max().unwrap_or(0)
    }

    /// True when the snapshot has no columns or no rows
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Copy of the given row range across all columns
    pub fn slice_rows(&self, start: usize, end: usize) -> Vec<Vec<Option<String>>> {
        let end = end.min(self.row_count());
        (start..end)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.values.get(row).cloned().flatten())
                    .collect()
            })
            .collect()
    }
}

/// Accept strings, numbers, booleans or null as cell values
fn deserialize_cells<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|v| match v {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .collect())
}
