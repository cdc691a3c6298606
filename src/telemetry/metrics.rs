//! Prometheus metrics

use std::time::Duration;

use crate::market::{Liveness, MarketType};
use crate::signal::SkipReason;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// One batch through the engine
    Analysis,
    /// Table provider fetch
    Fetch,
    /// Narrative generation
    Narrative,
}

impl LatencyMetric {
    fn name(&self) -> &'static str {
        match self {
            LatencyMetric::Analysis => "kairos_analysis_latency_ms",
            LatencyMetric::Fetch => "kairos_fetch_latency_ms",
            LatencyMetric::Narrative => "kairos_narrative_latency_ms",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    metrics::histogram!(metric.name()).record(duration.as_secs_f64() * 1000.0);
}

/// Count a classified snapshot
pub fn record_snapshot(liveness: Liveness) {
    metrics::counter!("kairos_snapshots_total", "kind" => liveness.as_str()).increment(1);
}

/// Count a skipped snapshot
pub fn record_skip(reason: SkipReason) {
    metrics::counter!("kairos_snapshots_skipped_total", "reason" => reason.as_str()).increment(1);
}

/// Count a significant drop
pub fn record_drop(market: MarketType) {
    metrics::counter!("kairos_drops_detected_total", "market" => market.as_str()).increment(1);
}

/// Count an anomaly held back by the red-card heuristic
pub fn record_suppressed() {
    metrics::counter!("kairos_suppressed_total").increment(1);
}

/// Count an event whose analysis failed
pub fn record_event_failure() {
    metrics::counter!("kairos_event_failures_total").increment(1);
}

/// Set the number of events seen in the last cycle
pub fn set_live_events(count: usize) {
    metrics::gauge!("kairos_live_events").set(count as f64);
}
