//! Pre-match baseline collection

use super::{BaselineOdds, SelectionOdds, SelectionPrice, SkipReason};
use crate::snapshot::Snapshot;

/// Canonical selection labels, in collection order
pub const SELECTION_LABELS: [&str; 8] = ["1", "X", "2", "Home", "Draw", "Away", "Over", "Under"];

/// Accumulates first-seen odds across the pre-match tables of one batch.
///
/// Owned by a single analysis call and consumed into [`BaselineOdds`].
#[derive(Debug, Default)]
pub struct BaselineCollector {
    odds: BaselineOdds,
}

impl BaselineCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the first usable price of each selection column in a pre-match
    /// table. Tables without any price contribute nothing.
    pub fn collect(&mut self, snapshot_id: &str, snapshot: &Snapshot) -> Result<usize, SkipReason> {
        let odds = first_seen_odds(snapshot);
        if odds.is_empty() {
            return Err(SkipReason::NoBaselineOdds);
        }

        let count = odds.len();
        tracing::debug!(snapshot = snapshot_id, selections = count, "Baseline odds captured");
        self.odds.insert(snapshot_id.to_string(), odds);
        Ok(count)
    }

    /// Odds collected so far
    pub fn snapshot(&self) -> &BaselineOdds {
        &self.odds
    }

    pub fn finish(self) -> BaselineOdds {
        self.odds
    }
}

fn first_seen_odds(snapshot: &Snapshot) -> SelectionOdds {
    SELECTION_LABELS
        .iter()
        .filter_map(|label| {
            let column = snapshot.column(label)?;
            let value = column.usable_values().next()?;
            Some(SelectionPrice {
                label: label.to_string(),
                price: value.to_string(),
            })
        })
        .collect()
}
