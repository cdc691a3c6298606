//! Batch orchestration
//!
//! Runs one event's snapshot batch through the pipeline:
//! 1. Classify each table as pre-match or live
//! 2. Pre-match tables feed the baseline collector
//! 3. Live tables go through the drop detector until the first hit
//! 4. The red-card filter assesses the full batch independently

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Instant;

use super::{AnomalyResult, BaselineCollector, DropDetector, DropRecord, RedCardFilter, SkipReason};
use crate::config::RedCardConfig;
use crate::market::{classify, Liveness, ThresholdPolicy};
use crate::snapshot::Snapshot;
use crate::telemetry;

/// Stateless anomaly engine; every call owns its own accumulators
pub struct DropOrchestrator {
    detector: DropDetector,
    filter: RedCardFilter,
}

impl DropOrchestrator {
    /// Create a new orchestrator
    pub fn new(thresholds: ThresholdPolicy, red_card: RedCardConfig) -> Self {
        Self {
            detector: DropDetector::new(thresholds),
            filter: RedCardFilter::new(red_card),
        }
    }

    /// Create with default thresholds and red-card settings
    pub fn with_defaults() -> Self {
        Self::new(ThresholdPolicy::default(), RedCardConfig::default())
    }

    pub fn thresholds(&self) -> &ThresholdPolicy {
        self.detector.thresholds()
    }

    /// Analyse one event's batch as observed at `observed_at`.
    ///
    /// Identical inputs always produce identical results.
    pub fn analyze(&self, event_id: &str, batch: &[Snapshot], observed_at: DateTime<Utc>) -> AnomalyResult {
        let started = Instant::now();
        let mut baseline = BaselineCollector::new();
        let ids = snapshot_ids(batch);

        let hit = batch.iter().zip(&ids).find_map(|(snapshot, id)| {
            self.inspect(event_id, id, snapshot, &mut baseline, observed_at)
                .map(|record| (id, snapshot, record))
        });

        let red_card = self.filter.assess(batch);
        if red_card.event_driven {
            tracing::info!(
                event = event_id,
                big_drop_tables = red_card.big_drop_tables,
                suspended_tables = red_card.suspended_tables,
                "Batch looks event-driven, anomaly not actionable"
            );
        }

        let result = match hit {
            Some((id, snapshot, record)) => {
                let mut opportunity = snapshot.clone();
                opportunity.id = id.clone();
                let actionable = !red_card.event_driven;
                if !actionable {
                    telemetry::record_suppressed();
                }
                AnomalyResult {
                    event_id: event_id.to_string(),
                    observed_at,
                    opportunity: Some(opportunity),
                    baseline: baseline.finish(),
                    drop_record: Some(record),
                    actionable,
                    red_card,
                }
            }
            None => {
                tracing::debug!(event = event_id, "No significant drop in batch");
                AnomalyResult {
                    event_id: event_id.to_string(),
                    observed_at,
                    opportunity: None,
                    baseline: baseline.finish(),
                    drop_record: None,
                    actionable: false,
                    red_card,
                }
            }
        };

        telemetry::record_latency(telemetry::LatencyMetric::Analysis, started.elapsed());
        result
    }

    /// Route one table; returns a record only for a qualifying live drop
    fn inspect(
        &self,
        event_id: &str,
        id: &str,
        snapshot: &Snapshot,
        baseline: &mut BaselineCollector,
        observed_at: DateTime<Utc>,
    ) -> Option<DropRecord> {
        if snapshot.is_empty() {
            log_skip(event_id, id, SkipReason::EmptySnapshot);
            return None;
        }

        let liveness = classify(snapshot);
        telemetry::record_snapshot(liveness);

        match liveness {
            Liveness::PreMatch => {
                if let Err(reason) = baseline.collect(id, snapshot) {
                    log_skip(event_id, id, reason);
                }
                None
            }
            Liveness::Live => match self.detector.detect(id, snapshot, observed_at) {
                Ok(record) => {
                    tracing::info!(
                        event = event_id,
                        snapshot = id,
                        market = %record.market_type,
                        value = %record.raw_value,
                        threshold = %record.threshold_used,
                        "Significant drop detected"
                    );
                    telemetry::record_drop(record.market_type);
                    Some(record)
                }
                Err(reason) => {
                    log_skip(event_id, id, reason);
                    None
                }
            },
        }
    }
}

/// Keys for every table of the batch: the provider id, or `table_<n>` by
/// 1-based position when blank. A key already taken earlier in the batch gets
/// the position appended, so every table keeps its own entry.
fn snapshot_ids(batch: &[Snapshot]) -> Vec<String> {
    let mut seen = HashSet::new();
    batch
        .iter()
        .enumerate()
        .map(|(index, snapshot)| {
            let position = index + 1;
            let mut id = if snapshot.id.is_empty() {
                format!("table_{}", position)
            } else {
                snapshot.id.clone()
            };
            while !seen.insert(id.clone()) {
                id = format!("{}_{}", id, position);
            }
            id
        })
        .collect()
}

fn log_skip(event_id: &str, snapshot: &str, reason: SkipReason) {
    tracing::debug!(event = event_id, snapshot, reason = reason.as_str(), "Snapshot skipped");
    telemetry::record_skip(reason);
}
