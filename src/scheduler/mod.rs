//! Event scheduling
//!
//! Enumerates live events, runs the orchestrator on each, and forwards
//! actionable anomalies to the narrative generator. One event failing never
//! stops the others.

mod provider;
mod runner;

pub use provider::{DirectoryProvider, EventBatch, TableProvider};
pub use runner::{CycleReport, EventOutcome, EventReport, Scheduler};
