//! Integration tests for the anomaly engine

use chrono::{DateTime, TimeZone, Utc};
use kairos::market::{classify, Liveness, MarketType, ThresholdPolicy};
use kairos::signal::DropOrchestrator;
use kairos::snapshot::Snapshot;
use rust_decimal_macros::dec;

fn observed() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 14, 18, 5, 0).unwrap()
}

#[test]
fn test_scenario_a_small_drops_only_collect_baseline() {
    let batch = vec![
        Snapshot::new("")
            .with_column("Home", ["2.0"])
            .with_column("Away", ["3.5"]),
        Snapshot::new("")
            .with_column("Time", ["10", "11"])
            .with_column("Home", ["1.9", "1.9"])
            .with_column("Away", ["3.8", "3.9"])
            .with_column("Drop", ["-5%", "12%"]),
    ];

    let result = DropOrchestrator::with_defaults().analyze("1001", &batch, observed());

    assert!(result.opportunity.is_none());
    assert!(result.drop_record.is_none());
    assert!(!result.actionable);
    let odds = result.baseline.get("table_1").expect("baseline from first table");
    assert_eq!(odds.get("Home"), Some("2.0"));
    assert_eq!(odds.get("Away"), Some("3.5"));
}

fn live_totals(drop: &str) -> Snapshot {
    Snapshot::new("")
        .with_column("Time", ["72"])
        .with_column("Over", ["1.55"])
        .with_column("Under", ["2.40"])
        .with_column("Drop", [drop])
}

#[test]
fn test_scenario_b_total_goals_drop() {
    let batch = vec![live_totals("60%")];

    let result = DropOrchestrator::with_defaults().analyze("1002", &batch, observed());

    let record = result.drop_record.expect("drop record");
    assert_eq!(record.market_type, MarketType::TotalGoals);
    assert_eq!(record.numeric_value, dec!(0.60));
    assert_eq!(record.threshold_used, dec!(0.50));
    assert_eq!(record.detected_at, observed());
    assert!(result.opportunity.is_some());
    assert!(result.actionable);
}

#[test]
fn test_scenario_c_suspended_market_is_ignored() {
    let batch = vec![Snapshot::new("")
        .with_column("Time", ["88", "89"])
        .with_column("1", ["-", "2.2"])
        .with_column("X", ["3.1", "3.0"])
        .with_column("Drop", ["99%", "95%"])];

    let result = DropOrchestrator::with_defaults().analyze("1003", &batch, observed());

    assert!(result.opportunity.is_none());
    assert!(result.drop_record.is_none());
    assert!(!result.actionable);
}

#[test]
fn test_red_card_suppression_keeps_anomaly() {
    let big = Snapshot::new("")
        .with_column("Time", ["40", "41", "42"])
        .with_column("Home", ["1.3", "1.2", "1.2"])
        .with_column("Away", ["9.0", "11", "13"])
        .with_column("Drop", ["80%", "-85%", "92%"]);
    let batch = vec![big.clone(), big];

    let result = DropOrchestrator::with_defaults().analyze("1004", &batch, observed());

    assert!(result.opportunity.is_some());
    assert!(result.drop_record.is_some());
    assert_eq!(result.red_card.big_drop_tables, 2);
    assert!(!result.actionable);
}

#[test]
fn test_preceding_rows_are_below_threshold_or_unparsable() {
    let batch = vec![Snapshot::new("")
        .with_column("Time", ["5"; 7])
        .with_column("Home", ["2.0"; 7])
        .with_column("Away", ["3.0"; 7])
        .with_column("Drop", ["3%", "n/a", "", "-49%", "-", "0,51", "80%"])];

    let record = DropOrchestrator::with_defaults()
        .analyze("1005", &batch, observed())
        .drop_record
        .unwrap();

    assert_eq!(record.row_index, 5);
    assert_eq!(record.raw_value, "0,51");
    assert_eq!(record.numeric_value, dec!(0.51));
}

#[test]
fn test_half_time_market_uses_lower_threshold() {
    let batch = vec![Snapshot::new("")
        .with_column("Time", ["30"])
        .with_column("Home", ["1.9"])
        .with_column("Away", ["4.1"])
        .with_column("HT Drop", ["42%"])];

    let record = DropOrchestrator::with_defaults()
        .analyze("1006", &batch, observed())
        .drop_record
        .unwrap();

    assert_eq!(record.market_type, MarketType::OneXTwoHt);
    assert_eq!(record.threshold_used, dec!(0.40));
}

#[test]
fn test_custom_thresholds_apply() {
    let policy = ThresholdPolicy {
        total_goals: dec!(0.70),
        ..ThresholdPolicy::default()
    };
    let orchestrator = DropOrchestrator::new(policy, Default::default());
    let batch = vec![live_totals("60%")];

    assert!(orchestrator.analyze("1007", &batch, observed()).opportunity.is_none());
}

#[test]
fn test_liveness_classification_properties() {
    let no_signal = [
        Snapshot::new("").with_column("Home", ["2.0"]),
        Snapshot::new("").with_column("Time", ["", "-", "-3"]),
        Snapshot::new("").with_cells("Time", vec![None]),
    ];
    for snapshot in &no_signal {
        assert_eq!(classify(snapshot), Liveness::PreMatch);
    }

    let with_signal = [
        Snapshot::new("").with_column("Time", ["0"]),
        Snapshot::new("").with_column("Time", ["x", "90"]),
        Snapshot::new("").with_column("Time", ["12.5"]),
    ];
    for snapshot in &with_signal {
        assert_eq!(classify(snapshot), Liveness::Live);
    }
}

#[test]
fn test_identical_batches_produce_identical_results() {
    let batch = vec![
        Snapshot::new("")
            .with_column("1", ["2.10"])
            .with_column("X", ["-"])
            .with_column("2", ["3.40"]),
        Snapshot::new("")
            .with_column("Time", ["60", "61", "62"])
            .with_column("Over", ["-", "-", "1.8"])
            .with_column("Under", ["2.0", "2.0", "2.0"])
            .with_column("Drop", ["1%", "2%", "3%"]),
    ];
    let orchestrator = DropOrchestrator::with_defaults();
    let first = orchestrator.analyze("1008", &batch, observed());
    let second = orchestrator.analyze("1008", &batch, observed());
    assert_eq!(first, second);

    let odds = first.baseline.get("table_1").unwrap();
    assert_eq!(odds.len(), 2);
    assert!(odds.get("X").is_none());
}
