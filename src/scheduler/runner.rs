//! Periodic analysis of live events

use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::TableProvider;
use crate::config::SchedulerConfig;
use crate::error::{CollaboratorError, Result};
use crate::narrative::{MatchDetails, NarrativeGenerator, NarrativeRequest};
use crate::signal::{AnomalyResult, DropOrchestrator};
use crate::snapshot::ViewLimits;
use crate::telemetry::{self, LatencyMetric};

/// What happened to one event during a cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventOutcome {
    /// No significant drop
    Quiet,
    /// Drop found but held back by the red-card heuristic
    Suppressed,
    /// Drop found and narrated
    Narrated { narrative: String },
    /// A collaborator failed for this event only
    Failed { error: String },
}

/// Per-event entry of a cycle report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventReport {
    pub event_id: String,
    pub outcome: EventOutcome,
    /// Engine result when analysis ran
    pub result: Option<AnomalyResult>,
}

/// Summary of one pass over all live events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub events: Vec<EventReport>,
}

impl CycleReport {
    pub fn narrated(&self) -> usize {
        self.count(|o| matches!(o, EventOutcome::Narrated { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, EventOutcome::Failed { .. }))
    }

    fn count(&self, f: impl Fn(&EventOutcome) -> bool) -> usize {
        self.events.iter().filter(|e| f(&e.outcome)).count()
    }
}

/// Runs the orchestrator over every live event on a fixed interval
pub struct Scheduler<P: TableProvider, N: NarrativeGenerator> {
    provider: Arc<P>,
    narrator: Arc<N>,
    orchestrator: Arc<DropOrchestrator>,
    limits: ViewLimits,
    config: SchedulerConfig,
}

impl<P: TableProvider, N: NarrativeGenerator> Scheduler<P, N> {
    /// Create a new scheduler
    pub fn new(
        provider: Arc<P>,
        narrator: Arc<N>,
        orchestrator: Arc<DropOrchestrator>,
        limits: ViewLimits,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            provider,
            narrator,
            orchestrator,
            limits,
            config,
        }
    }

    /// Analyse every live event once. Only event enumeration can fail the
    /// cycle; per-event failures are recorded in the report.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let started_at = Utc::now();
        let cycle_id = Uuid::new_v4();
        let events = self.provider.live_events().await?;
        telemetry::set_live_events(events.len());
        tracing::info!(%cycle_id, events = events.len(), "Starting analysis cycle");

        let pause = Duration::from_millis(self.config.pause_between_events_ms);
        let reports = stream::iter(events.into_iter().enumerate())
            .then(|(index, event_id)| async move {
                if index > 0 && !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                }
                event_id
            })
            .map(|event_id| self.process_event(event_id))
            .buffered(self.config.max_concurrent_events.max(1))
            .collect::<Vec<_>>()
            .await;

        Ok(CycleReport {
            cycle_id,
            started_at,
            events: reports,
        })
    }

    /// Repeat cycles until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(Duration::from_secs(self.config.interval_secs.max(1)));
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Scheduler shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.run_cycle().await {
                        Ok(report) => tracing::info!(
                            cycle_id = %report.cycle_id,
                            events = report.events.len(),
                            narrated = report.narrated(),
                            failed = report.failed(),
                            "Cycle complete"
                        ),
                        Err(e) => tracing::warn!(error = %e, "Could not enumerate live events"),
                    }
                }
            }
        }
    }

    async fn process_event(&self, event_id: String) -> EventReport {
        let (result, details) = match self.analyze_event(&event_id).await {
            Ok(analysed) => analysed,
            Err(e) => return failed_report(event_id, e, None),
        };

        match self.narrate(&event_id, &result, &details).await {
            Ok(outcome) => EventReport {
                event_id,
                outcome,
                result: Some(result),
            },
            Err(e) => failed_report(event_id, e, Some(result)),
        }
    }

    async fn analyze_event(&self, event_id: &str) -> Result<(AnomalyResult, MatchDetails)> {
        let fetch_started = Instant::now();
        let batch = self.provider.fetch_snapshots(event_id).await?;
        telemetry::record_latency(LatencyMetric::Fetch, fetch_started.elapsed());

        let observed_at = batch.observed_at.unwrap_or_else(Utc::now);
        let orchestrator = Arc::clone(&self.orchestrator);
        let id = event_id.to_string();
        let snapshots = batch.snapshots;
        let result = tokio::task::spawn_blocking(move || orchestrator.analyze(&id, &snapshots, observed_at))
            .await
            .map_err(|e| CollaboratorError::Task(e.to_string()))?;

        Ok((result, batch.details))
    }

    async fn narrate(&self, event_id: &str, result: &AnomalyResult, details: &MatchDetails) -> Result<EventOutcome> {
        if !result.has_opportunity() {
            return Ok(EventOutcome::Quiet);
        }

        let Some(request) = NarrativeRequest::from_result(result, details, self.limits) else {
            return Ok(EventOutcome::Suppressed);
        };

        let narrative_started = Instant::now();
        let narrative = self.narrator.generate(&request).await?;
        telemetry::record_latency(LatencyMetric::Narrative, narrative_started.elapsed());
        tracing::info!(event = event_id, generator = self.narrator.name(), "Narrative generated");

        Ok(EventOutcome::Narrated { narrative })
    }
}

/// Failure entry; keeps the engine result when the failure came after analysis
fn failed_report(event_id: String, error: CollaboratorError, result: Option<AnomalyResult>) -> EventReport {
    tracing::warn!(event = %event_id, error = %error, analysed = result.is_some(), "Event processing failed");
    telemetry::record_event_failure();
    EventReport {
        event_id,
        outcome: EventOutcome::Failed {
            error: error.to_string(),
        },
        result,
    }
}
