//! Market type inference from column signatures
//!
//! Rules are evaluated top to bottom and the first match wins. The order is
//! part of the contract: a table with Home/Away and Over/Under columns is 1X2.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::snapshot::Snapshot;

/// Category of bet a table represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketType {
    OneXTwo,
    OneXTwoHt,
    TotalGoals,
    TotalGoalsHt,
    AsianHandicap,
    Unknown,
}

impl MarketType {
    pub const ALL: [MarketType; 6] = [
        MarketType::OneXTwo,
        MarketType::OneXTwoHt,
        MarketType::TotalGoals,
        MarketType::TotalGoalsHt,
        MarketType::AsianHandicap,
        MarketType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::OneXTwo => "1X2",
            MarketType::OneXTwoHt => "1X2_HT",
            MarketType::TotalGoals => "TOTAL_GOALS",
            MarketType::TotalGoalsHt => "TOTAL_GOALS_HT",
            MarketType::AsianHandicap => "ASIAN_HANDICAP",
            MarketType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the ordered rule list
struct Rule {
    matches: fn(&Snapshot) -> bool,
    market: fn(&Snapshot) -> MarketType,
}

const RULES: &[Rule] = &[
    Rule {
        matches: is_one_x_two,
        market: one_x_two_variant,
    },
    Rule {
        matches: is_total_goals,
        market: total_goals_variant,
    },
    Rule {
        matches: is_asian_handicap,
        market: asian_handicap,
    },
];

fn is_one_x_two(snapshot: &Snapshot) -> bool {
    snapshot.has_column("Home") && snapshot.has_column("Away")
}

fn one_x_two_variant(snapshot: &Snapshot) -> MarketType {
    if has_half_time_column(snapshot) {
        MarketType::OneXTwoHt
    } else {
        MarketType::OneXTwo
    }
}

fn is_total_goals(snapshot: &Snapshot) -> bool {
    snapshot.has_column("Over") && snapshot.has_column("Under")
}

fn total_goals_variant(snapshot: &Snapshot) -> MarketType {
    if has_half_time_column(snapshot) {
        MarketType::TotalGoalsHt
    } else {
        MarketType::TotalGoals
    }
}

fn is_asian_handicap(snapshot: &Snapshot) -> bool {
    snapshot.has_column("Handicap")
        || snapshot
            .drop_column()
            .is_some_and(|c| c.name.to_lowercase().contains("sharpness"))
}

fn asian_handicap(_: &Snapshot) -> MarketType {
    MarketType::AsianHandicap
}

fn has_half_time_column(snapshot: &Snapshot) -> bool {
    snapshot
        .column_names()
        .any(|name| name.to_lowercase().contains("ht"))
}

/// Infer the market type; falls back to `Unknown` when no rule matches
pub fn identify(snapshot: &Snapshot) -> MarketType {
    RULES
        .iter()
        .find(|rule| (rule.matches)(snapshot))
        .map(|rule| (rule.market)(snapshot))
        .unwrap_or(MarketType::Unknown)
}
