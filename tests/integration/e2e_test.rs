//! End-to-end tests over batch documents on disk

use kairos::config::Config;
use kairos::scheduler::{DirectoryProvider, EventOutcome, Scheduler};
use kairos::narrative::LogNarrator;
use kairos::signal::DropOrchestrator;
use std::sync::Arc;

const LIVE_EVENT: &str = r#"{
    "details": {"teams": "Benfica vs Porto", "score": "1-1", "clock": "71'"},
    "observed_at": "2024-09-14T18:05:00Z",
    "snapshots": [
        {"id": "1x2_prematch", "columns": [
            {"name": "Time", "values": [null, null]},
            {"name": "1", "values": ["2.10", "2.05"]},
            {"name": "X", "values": ["-", "3.30"]},
            {"name": "2", "values": ["3.40", "3.50"]}
        ]},
        {"columns": [
            {"name": "Time", "values": [70, 71]},
            {"name": "Over", "values": ["1.60", "1.55"]},
            {"name": "Under", "values": ["2.30", "2.40"]},
            {"name": "Drop", "values": ["8%", "60%"]}
        ]}
    ]
}"#;

#[test]
fn test_config_example_exists() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.narrative.max_full_rows, 10);
    assert_eq!(config.scheduler.interval_secs, 60);
}

#[tokio::test]
async fn test_watch_cycle_over_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("5001.json"), LIVE_EVENT).unwrap();
    std::fs::write(dir.path().join("5002.json"), "not a batch").unwrap();

    let config = Config::default();
    let scheduler = Scheduler::new(
        Arc::new(DirectoryProvider::new(dir.path())),
        Arc::new(LogNarrator),
        Arc::new(DropOrchestrator::new(config.thresholds.clone(), config.red_card.clone())),
        config.view_limits(),
        config.scheduler.clone(),
    );

    let report = scheduler.run_cycle().await.unwrap();
    assert_eq!(report.events.len(), 2);

    let ok = &report.events[0];
    assert_eq!(ok.event_id, "5001");
    match &ok.outcome {
        EventOutcome::Narrated { narrative } => {
            assert!(narrative.contains("Benfica vs Porto"));
            assert!(narrative.contains("TOTAL_GOALS"));
            assert!(narrative.contains("1x2_prematch: 1=2.10, 2=3.40"));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    let record = ok.result.as_ref().unwrap().drop_record.as_ref().unwrap();
    assert_eq!(record.snapshot_id, "table_2");
    assert_eq!(record.detected_at.to_rfc3339(), "2024-09-14T18:05:00+00:00");

    assert!(matches!(report.events[1].outcome, EventOutcome::Failed { .. }));
}
