//! Table providers

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CollaboratorError, Result};
use crate::narrative::MatchDetails;
use crate::snapshot::Snapshot;

/// One event's tables as supplied by a provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBatch {
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub details: MatchDetails,
    /// When the tables were captured; defaults to fetch time
    #[serde(default)]
    pub observed_at: Option<DateTime<Utc>>,
    /// Tables in page order
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

/// Supplies live events and their snapshot batches
#[async_trait]
pub trait TableProvider: Send + Sync {
    /// Identifiers of the events currently in play
    async fn live_events(&self) -> Result<Vec<String>>;

    /// Ordered snapshot batch for one event
    async fn fetch_snapshots(&self, event_id: &str) -> Result<EventBatch>;
}

/// Reads `<dir>/<event_id>.json` batch documents
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
}

impl DirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Parse a batch document from disk
    pub async fn read_batch(path: impl Into<PathBuf>) -> Result<EventBatch> {
        let path = path.into();
        let content = tokio::fs::read_to_string(&path).await?;
        let mut batch: EventBatch = serde_json::from_str(&content)?;
        if batch.event_id.is_empty() {
            batch.event_id = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(batch)
    }
}

#[async_trait]
impl TableProvider for DirectoryProvider {
    async fn live_events(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut events = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                events.push(stem.to_string());
            }
        }

        events.sort();
        Ok(events)
    }

    async fn fetch_snapshots(&self, event_id: &str) -> Result<EventBatch> {
        if event_id.contains(['/', '\\']) || event_id.starts_with('.') {
            return Err(CollaboratorError::Provider(format!(
                "invalid event id: {}",
                event_id
            )));
        }
        let mut batch = Self::read_batch(self.dir.join(format!("{}.json", event_id))).await?;
        batch.event_id = event_id.to_string();
        Ok(batch)
    }
}
