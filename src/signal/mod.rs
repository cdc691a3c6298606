//! Drop signal detection
//!
//! Finds magnitude-significant odds drops in an event's tables and decides
//! whether they are worth a narrative.

mod baseline;
mod detector;
mod filter;
mod orchestrator;
mod types;

pub use baseline::{BaselineCollector, SELECTION_LABELS};
pub use detector::{drop_values, DropDetector, DropValue};
pub use filter::{RedCardAssessment, RedCardFilter};
pub use orchestrator::DropOrchestrator;
pub use types::{AnomalyResult, BaselineOdds, DropRecord, SelectionOdds, SelectionPrice, SkipReason};
