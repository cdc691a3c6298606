//! Pre-match vs live classification

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::normalize::parse_decimal;
use crate::snapshot::Snapshot;

/// Column whose numeric values mark a table as in-play
pub const TIME_COLUMN: &str = "Time";

/// Whether a snapshot was taken before or during the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Liveness {
    PreMatch,
    Live,
}

impl Liveness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Liveness::PreMatch => "pre_match",
            Liveness::Live => "live",
        }
    }
}

/// Live iff the "Time" column holds at least one value parsing to a number >= 0.
/// No column or no such value means pre-match.
pub fn classify(snapshot: &Snapshot) -> Liveness {
    let Some(time) = snapshot.column(TIME_COLUMN) else {
        return Liveness::PreMatch;
    };

    let live = time
        .values
        .iter()
        .filter_map(|v| v.as_deref())
        .filter_map(parse_decimal)
        .any(|minute| minute >= Decimal::ZERO);

    if live {
        Liveness::Live
    } else {
        Liveness::PreMatch
    }
}
