//! Integration tests for the scheduler

use async_trait::async_trait;
use kairos::config::SchedulerConfig;
use kairos::error::{CollaboratorError, Result};
use kairos::narrative::{NarrativeGenerator, NarrativeRequest};
use kairos::scheduler::{EventBatch, EventOutcome, Scheduler, TableProvider};
use kairos::signal::DropOrchestrator;
use kairos::snapshot::{Snapshot, ViewLimits};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct MemoryProvider {
    batches: HashMap<String, Vec<Snapshot>>,
    broken: Vec<String>,
}

#[async_trait]
impl TableProvider for MemoryProvider {
    async fn live_events(&self) -> Result<Vec<String>> {
        let mut events: Vec<String> = self.batches.keys().cloned().collect();
        events.extend(self.broken.iter().cloned());
        events.sort();
        Ok(events)
    }

    async fn fetch_snapshots(&self, event_id: &str) -> Result<EventBatch> {
        let snapshots = self
            .batches
            .get(event_id)
            .cloned()
            .ok_or_else(|| CollaboratorError::Provider(format!("page for {} unavailable", event_id)))?;
        Ok(EventBatch {
            event_id: event_id.to_string(),
            snapshots,
            ..Default::default()
        })
    }
}

#[derive(Default)]
struct RecordingNarrator {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl NarrativeGenerator for RecordingNarrator {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String> {
        self.seen.lock().unwrap().push(request.event_id.clone());
        Ok(format!("drop of {} on {}", request.drop.raw_value, request.event_id))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Fails for one event, narrates the rest
struct FlakyNarrator {
    failing: String,
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl NarrativeGenerator for FlakyNarrator {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String> {
        if request.event_id == self.failing {
            return Err(CollaboratorError::Narrative("model timed out".to_string()));
        }
        self.seen.lock().unwrap().push(request.event_id.clone());
        Ok(format!("drop on {}", request.event_id))
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

fn live(drops: &[&str]) -> Snapshot {
    let n = drops.len();
    Snapshot::new("")
        .with_column("Time", vec!["50"; n])
        .with_column("Home", vec!["1.7"; n])
        .with_column("Away", vec!["5.0"; n])
        .with_column("Drop", drops.iter().copied())
}

fn scheduler(provider: MemoryProvider, narrator: Arc<RecordingNarrator>) -> Scheduler<MemoryProvider, RecordingNarrator> {
    Scheduler::new(
        Arc::new(provider),
        narrator,
        Arc::new(DropOrchestrator::with_defaults()),
        ViewLimits::default(),
        SchedulerConfig::default(),
    )
}

#[tokio::test]
async fn test_cycle_isolates_event_failures() {
    let provider = MemoryProvider {
        batches: HashMap::from([
            ("a".to_string(), vec![live(&["65%"])]),
            ("c".to_string(), vec![live(&["4%"])]),
        ]),
        broken: vec!["b".to_string()],
    };
    let narrator = Arc::new(RecordingNarrator::default());

    let report = scheduler(provider, Arc::clone(&narrator)).run_cycle().await.unwrap();

    assert_eq!(report.events.len(), 3);
    assert_eq!(report.narrated(), 1);
    assert_eq!(report.failed(), 1);

    let by_id: HashMap<_, _> = report.events.iter().map(|e| (e.event_id.as_str(), e)).collect();
    assert!(matches!(by_id["a"].outcome, EventOutcome::Narrated { .. }));
    assert!(matches!(by_id["b"].outcome, EventOutcome::Failed { .. }));
    assert!(by_id["b"].result.is_none());
    assert!(matches!(by_id["c"].outcome, EventOutcome::Quiet));

    assert_eq!(*narrator.seen.lock().unwrap(), vec!["a".to_string()]);
}

#[tokio::test]
async fn test_suppressed_anomaly_is_not_narrated() {
    let big = live(&["85%", "90%", "95%"]);
    let provider = MemoryProvider {
        batches: HashMap::from([("red".to_string(), vec![big.clone(), big])]),
        broken: vec![],
    };
    let narrator = Arc::new(RecordingNarrator::default());

    let report = scheduler(provider, Arc::clone(&narrator)).run_cycle().await.unwrap();

    assert!(matches!(report.events[0].outcome, EventOutcome::Suppressed));
    let result = report.events[0].result.as_ref().unwrap();
    assert!(result.has_opportunity());
    assert!(!result.actionable);
    assert!(narrator.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_run_stops_on_shutdown() {
    let provider = MemoryProvider {
        batches: HashMap::new(),
        broken: vec![],
    };
    let narrator = Arc::new(RecordingNarrator::default());
    let scheduler = scheduler(provider, narrator);

    tokio::time::timeout(std::time::Duration::from_secs(5), scheduler.run(async {}))
        .await
        .expect("scheduler should stop when shutdown resolves");
}

#[tokio::test]
async fn test_narrator_failure_keeps_analysis_result() {
    let provider = MemoryProvider {
        batches: HashMap::from([
            ("a".to_string(), vec![live(&["65%"])]),
            ("b".to_string(), vec![live(&["70%"])]),
            ("c".to_string(), vec![live(&["75%"])]),
        ]),
        broken: vec![],
    };
    let narrator = Arc::new(FlakyNarrator {
        failing: "b".to_string(),
        seen: Mutex::new(Vec::new()),
    });
    let scheduler = Scheduler::new(
        Arc::new(provider),
        Arc::clone(&narrator),
        Arc::new(DropOrchestrator::with_defaults()),
        ViewLimits::default(),
        SchedulerConfig::default(),
    );

    let report = scheduler.run_cycle().await.unwrap();

    assert_eq!(report.narrated(), 2);
    assert_eq!(report.failed(), 1);

    let failed = report.events.iter().find(|e| e.event_id == "b").unwrap();
    match &failed.outcome {
        EventOutcome::Failed { error } => assert!(error.contains("model timed out")),
        other => panic!("expected failure, got {:?}", other),
    }
    let result = failed.result.as_ref().expect("analysis result kept");
    assert!(result.actionable);
    assert_eq!(result.drop_record.as_ref().unwrap().raw_value, "70%");

    let mut seen = narrator.seen.lock().unwrap().clone();
    seen.sort();
    assert_eq!(seen, vec!["a".to_string(), "c".to_string()]);
}

#[tokio::test]
async fn test_events_are_paced() {
    let provider = MemoryProvider {
        batches: HashMap::from([
            ("a".to_string(), vec![live(&["4%"])]),
            ("b".to_string(), vec![live(&["4%"])]),
            ("c".to_string(), vec![live(&["4%"])]),
        ]),
        broken: vec![],
    };
    let config = SchedulerConfig {
        max_concurrent_events: 1,
        pause_between_events_ms: 40,
        ..SchedulerConfig::default()
    };
    let scheduler = Scheduler::new(
        Arc::new(provider),
        Arc::new(RecordingNarrator::default()),
        Arc::new(DropOrchestrator::with_defaults()),
        ViewLimits::default(),
        config,
    );

    let started = std::time::Instant::now();
    let report = scheduler.run_cycle().await.unwrap();

    assert_eq!(report.events.len(), 3);
    assert!(started.elapsed() >= std::time::Duration::from_millis(80));
}
