//! Tabular odds snapshots
//!
//! The engine's input model plus the bounded views handed to collaborators.

mod types;
mod view;

pub use types::{Column, Snapshot, PLACEHOLDER};
pub use view::{TableView, ViewLimits};
