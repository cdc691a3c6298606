//! Drop detection on live tables

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{DropRecord, SkipReason};
use crate::market::{identify, is_active, ThresholdPolicy};
use crate::normalize::parse_fraction;
use crate::snapshot::{Column, Snapshot, PLACEHOLDER};

/// A drop cell that parsed to a number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropValue<'a> {
    pub row: usize,
    pub raw: &'a str,
    pub value: Decimal,
}

/// Parsed values of a drop column in row order. Missing, blank, placeholder
/// and unparsable cells are skipped one by one.
pub fn drop_values(column: &Column) -> impl Iterator<Item = DropValue<'_>> + '_ {
    column.values.iter().enumerate().filter_map(|(row, cell)| {
        let raw = cell.as_deref()?.trim();
        if raw.is_empty() || raw == PLACEHOLDER {
            return None;
        }
        match parse_fraction(raw) {
            Some(value) => Some(DropValue { row, raw, value }),
            None => {
                tracing::trace!(row, raw, "Unparsable drop value skipped");
                None
            }
        }
    })
}

/// Detects significant drops in live tables
pub struct DropDetector {
    thresholds: ThresholdPolicy,
}

impl DropDetector {
    /// Create a detector with the given threshold policy
    pub fn new(thresholds: ThresholdPolicy) -> Self {
        Self { thresholds }
    }

    /// Create a detector with the default thresholds
    pub fn with_defaults() -> Self {
        Self::new(ThresholdPolicy::default())
    }

    pub fn thresholds(&self) -> &ThresholdPolicy {
        &self.thresholds
    }

    /// Run the live pipeline on one table: market type, threshold, activity
    /// gate, then a scan that stops at the first qualifying row.
    pub fn detect(
        &self,
        snapshot_id: &str,
        snapshot: &Snapshot,
        observed_at: DateTime<Utc>,
    ) -> Result<DropRecord, SkipReason> {
        let market = identify(snapshot);
        let threshold = self.thresholds.threshold_for(market);

        if !is_active(snapshot) {
            return Err(SkipReason::MarketSuspended);
        }

        let column = snapshot.drop_column().ok_or(SkipReason::MissingDropColumn)?;

        let hit = drop_values(column)
            .find(|v| self.thresholds.is_significant(market, v.value))
            .ok_or(SkipReason::NoSignificantDrop)?;

        Ok(DropRecord {
            raw_value: hit.raw.to_string(),
            numeric_value: hit.value,
            column_name: column.name.clone(),
            market_type: market,
            row_count: snapshot.row_count(),
            threshold_used: threshold,
            detected_at: observed_at,
            snapshot_id: snapshot_id.to_string(),
            row_index: hit.row,
        })
    }
}
