//! Signal types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::RedCardAssessment;
use crate::market::MarketType;
use crate::snapshot::Snapshot;

/// A significant drop found in a live table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRecord {
    /// Cell text as scraped
    pub raw_value: String,
    /// Normalized value as a fraction (e.g. 0.60 for "60%")
    pub numeric_value: Decimal,
    /// Name of the drop column
    pub column_name: String,
    /// Market type inferred for the table
    pub market_type: MarketType,
    /// Rows in the table
    pub row_count: usize,
    /// Threshold the value was compared against
    pub threshold_used: Decimal,
    /// Batch observation time
    pub detected_at: DateTime<Utc>,
    /// Snapshot the drop came from
    pub snapshot_id: String,
    /// Zero-based row of the qualifying value
    pub row_index: usize,
}

/// One selection's pre-match price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPrice {
    pub label: String,
    pub price: String,
}

/// Pre-match prices from one table, in selection-label order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionOdds(Vec<SelectionPrice>);

impl SelectionOdds {
    /// Price recorded for a selection label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|selection| selection.label == label)
            .map(|selection| selection.price.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionPrice> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<SelectionPrice> for SelectionOdds {
    fn from_iter<I: IntoIterator<Item = SelectionPrice>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// First-seen pre-match odds, keyed by snapshot id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaselineOdds(BTreeMap<String, SelectionOdds>);

impl BaselineOdds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the odds already recorded under `snapshot_id`, if any
    pub(crate) fn insert(&mut self, snapshot_id: String, odds: SelectionOdds) {
        self.0.entry(snapshot_id).or_insert(odds);
    }

    /// Odds captured from one snapshot
    pub fn get(&self, snapshot_id: &str) -> Option<&SelectionOdds> {
        self.0.get(snapshot_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SelectionOdds)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of analysing one event's batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub event_id: String,
    pub observed_at: DateTime<Utc>,
    /// Table holding the first significant drop
    pub opportunity: Option<Snapshot>,
    /// Baseline collected from pre-match tables up to the opportunity
    pub baseline: BaselineOdds,
    pub drop_record: Option<DropRecord>,
    /// Whether the anomaly should go on to narrative generation
    pub actionable: bool,
    /// Cross-table red-card heuristic over the full batch
    pub red_card: RedCardAssessment,
}

impl AnomalyResult {
    pub fn has_opportunity(&self) -> bool {
        self.opportunity.is_some()
    }
}

/// Why a snapshot contributed nothing. None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Table had no rows
    EmptySnapshot,
    /// Live market shows placeholders instead of prices
    MarketSuspended,
    /// No column name contains "drop"
    MissingDropColumn,
    /// No drop value reached the threshold
    NoSignificantDrop,
    /// Pre-match table without any selection price
    NoBaselineOdds,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::EmptySnapshot => "empty_snapshot",
            SkipReason::MarketSuspended => "market_suspended",
            SkipReason::MissingDropColumn => "missing_drop_column",
            SkipReason::NoSignificantDrop => "no_significant_drop",
            SkipReason::NoBaselineOdds => "no_baseline_odds",
        }
    }
}
