//! Red-card suppression
//!
//! A sending-off moves every market at once: several bookmakers post large
//! drops and suspend the selections while they reprice. When a batch shows
//! enough of those footprints the anomaly is treated as event-driven and kept
//! away from narrative generation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::baseline::SELECTION_LABELS;
use super::detector::drop_values;
use crate::config::RedCardConfig;
use crate::snapshot::Snapshot;

/// Indicators gathered over a whole batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedCardAssessment {
    /// Tables with enough large drops
    pub big_drop_tables: usize,
    /// Tables where a selection column is mostly placeholders
    pub suspended_tables: usize,
    /// Whether the indicators reached the suppression level
    pub event_driven: bool,
}

impl RedCardAssessment {
    pub fn total(&self) -> usize {
        self.big_drop_tables + self.suspended_tables
    }
}

/// Cross-table red-card heuristic
pub struct RedCardFilter {
    config: RedCardConfig,
}

impl RedCardFilter {
    /// Create a new filter with given configuration
    pub fn new(config: RedCardConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(RedCardConfig::default())
    }

    /// Inspect every table of the batch, regardless of where drop scanning stopped
    pub fn assess(&self, batch: &[Snapshot]) -> RedCardAssessment {
        let mut assessment = RedCardAssessment::default();

        for snapshot in batch.iter().filter(|s| !s.is_empty()) {
            if self.has_big_drops(snapshot) {
                assessment.big_drop_tables += 1;
            }
            if self.has_suspended_selection(snapshot) {
                assessment.suspended_tables += 1;
            }
        }

        assessment.event_driven = assessment.total() >= self.config.min_indicators;
        assessment
    }

    fn has_big_drops(&self, snapshot: &Snapshot) -> bool {
        let Some(column) = snapshot.drop_column() else {
            return false;
        };
        let big = drop_values(column)
            .filter(|v| v.value.abs() >= self.config.big_drop_magnitude)
            .count();
        big >= self.config.min_big_drop_rows
    }

    fn has_suspended_selection(&self, snapshot: &Snapshot) -> bool {
        let limit = self.config.suspension_ratio * Decimal::from(snapshot.row_count());
        SELECTION_LABELS
            .iter()
            .filter_map(|label| snapshot.column(label))
            .any(|column| Decimal::from(column.placeholder_count()) > limit)
    }
}
