//! Market classification
//!
//! Per-snapshot decisions made before any drop is scanned:
//! - liveness (pre-match vs in-play)
//! - market type from the column signature
//! - significance threshold for that market type
//! - whether a live market is currently trading

mod activity;
mod classifier;
mod identifier;
mod threshold;

pub use activity::{is_active, ACTIVITY_COLUMNS};
pub use classifier::{classify, Liveness, TIME_COLUMN};
pub use identifier::{identify, MarketType};
pub use threshold::ThresholdPolicy;
