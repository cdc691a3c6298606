//! Narrative generation seam
//!
//! Actionable anomalies are handed to a [`NarrativeGenerator`] together with
//! the match context. Tables are condensed to keep payloads bounded.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::signal::{AnomalyResult, BaselineOdds, DropRecord};
use crate::snapshot::{TableView, ViewLimits};

/// Match context supplied alongside a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetails {
    #[serde(default)]
    pub teams: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
    /// Match clock as shown on the page (e.g. "67'")
    #[serde(default)]
    pub clock: Option<String>,
}

/// Everything a narrative generator receives for one anomaly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    pub event_id: String,
    pub details: MatchDetails,
    pub drop: DropRecord,
    pub baseline: BaselineOdds,
    pub table: TableView,
}

impl NarrativeRequest {
    /// Build a request from an actionable result; `None` otherwise
    pub fn from_result(result: &AnomalyResult, details: &MatchDetails, limits: ViewLimits) -> Option<Self> {
        if !result.actionable {
            return None;
        }
        let table = result.opportunity.as_ref()?;
        let drop = result.drop_record.as_ref()?;

        Some(Self {
            event_id: result.event_id.clone(),
            details: details.clone(),
            drop: drop.clone(),
            baseline: result.baseline.clone(),
            table: TableView::of(table, limits),
        })
    }

    /// Plain-text rendering of the request
    pub fn render(&self) -> String {
        let na = "N/A";
        let mut out = String::new();
        out.push_str(&format!(
            "Match: {}\nClock: {}\nScore: {}\n\n",
            self.details.teams.as_deref().unwrap_or(na),
            self.details.clock.as_deref().unwrap_or(na),
            self.details.score.as_deref().unwrap_or(na),
        ));
        out.push_str(&format!(
            "Drop value: {}\nMarket: {}\nColumn: {}\nTable rows: {}\nThreshold: {}\nDetected at: {}\n\n",
            self.drop.raw_value,
            self.drop.market_type,
            self.drop.column_name,
            self.drop.row_count,
            self.drop.threshold_used,
            self.drop.detected_at.to_rfc3339(),
        ));
        if !self.baseline.is_empty() {
            out.push_str("Pre-match odds:\n");
            for (table, odds) in self.baseline.iter() {
                let line = odds
                    .iter()
                    .map(|selection| format!("{}={}", selection.label, selection.price))
                    .collect::<Vec<_>>()
                    .join(", ");
                out.push_str(&format!("  {}: {}\n", table, line));
            }
            out.push('\n');
        }
        out.push_str(&self.table.render());
        out
    }
}

/// Produces commentary for an actionable anomaly
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Generate commentary text
    async fn generate(&self, request: &NarrativeRequest) -> Result<String>;

    /// Generator identifier for logs
    fn name(&self) -> &str;
}

/// Writes the rendered request to the log instead of calling a model
#[derive(Debug, Default, Clone)]
pub struct LogNarrator;

#[async_trait]
impl NarrativeGenerator for LogNarrator {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String> {
        let text = request.render();
        tracing::info!(event = %request.event_id, "\n{}", text);
        Ok(text)
    }

    fn name(&self) -> &str {
        "log"
    }
}
