//! Watch command implementation

use clap::Args;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::narrative::LogNarrator;
use crate::scheduler::{DirectoryProvider, Scheduler};
use crate::signal::DropOrchestrator;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Directory of `<event_id>.json` batch documents
    #[arg(short, long, default_value = "./events")]
    pub dir: PathBuf,

    /// Run a single cycle and print its report
    #[arg(long)]
    pub once: bool,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let orchestrator = DropOrchestrator::new(config.thresholds.clone(), config.red_card.clone());
        let scheduler = Scheduler::new(
            Arc::new(DirectoryProvider::new(&self.dir)),
            Arc::new(LogNarrator),
            Arc::new(orchestrator),
            config.view_limits(),
            config.scheduler.clone(),
        );

        if self.once {
            let report = scheduler.run_cycle().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        tracing::info!(
            dir = ?self.dir,
            interval_secs = config.scheduler.interval_secs,
            "Watching live events"
        );
        scheduler.run(shutdown_on(tokio::signal::ctrl_c())).await;
        Ok(())
    }
}

/// Resolves when `signal` fires. If the handler cannot be installed the
/// watch keeps running rather than stopping straight away.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::warn!(error = %e, "Could not listen for shutdown signal, stop the process to exit");
        std::future::pending::<()>().await;
    }
}
