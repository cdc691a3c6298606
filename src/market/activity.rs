//! Market-activity gate for live tables

use crate::snapshot::{Snapshot, PLACEHOLDER};

/// Selection columns checked for a live price, in priority order
pub const ACTIVITY_COLUMNS: [&str; 3] = ["1", "Home", "Over"];

/// A live market is active when one of the priority selection columns shows a
/// real price as its first non-blank cell. A placeholder there means the
/// bookmaker has the market suspended; the check moves on to the next column.
pub fn is_active(snapshot: &Snapshot) -> bool {
    ACTIVITY_COLUMNS
        .iter()
        .filter_map(|name| snapshot.column(name))
        .filter_map(|column| column.first_present())
        .any(|first| first != PLACEHOLDER)
}
