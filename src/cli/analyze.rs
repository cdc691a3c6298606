//! Analyze command implementation

use chrono::{DateTime, Utc};
use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::narrative::NarrativeRequest;
use crate::scheduler::DirectoryProvider;
use crate::signal::DropOrchestrator;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Event batch document (JSON)
    pub batch: PathBuf,

    /// Observation time (RFC 3339); overrides the document and the clock
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Also print the narrative payload when the result is actionable
    #[arg(long)]
    pub narrate: bool,
}

impl AnalyzeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let batch = DirectoryProvider::read_batch(&self.batch).await?;
        let observed_at = self.at.or(batch.observed_at).unwrap_or_else(Utc::now);

        let orchestrator = DropOrchestrator::new(config.thresholds.clone(), config.red_card.clone());
        let result = orchestrator.analyze(&batch.event_id, &batch.snapshots, observed_at);

        println!("{}", serde_json::to_string_pretty(&result)?);

        if self.narrate {
            match NarrativeRequest::from_result(&result, &batch.details, config.view_limits()) {
                Some(request) => println!("\n{}", request.render()),
                None => println!("\nNo actionable anomaly"),
            }
        }

        Ok(())
    }
}
