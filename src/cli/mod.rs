//! CLI interface for kairos
//!
//! Provides subcommands for:
//! - `analyze`: Run the engine on one batch file
//! - `watch`: Analyse a directory of live events on an interval
//! - `thresholds`: Show the active threshold table
//! - `config`: Show the effective configuration

mod analyze;
mod watch;

pub use analyze::AnalyzeArgs;
pub use watch::WatchArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "kairos")]
#[command(about = "Dropping-odds anomaly detection for live football markets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse one event batch file and print the result
    Analyze(AnalyzeArgs),
    /// Analyse every batch in a directory on an interval
    Watch(WatchArgs),
    /// Show the active threshold table
    Thresholds,
    /// Show the effective configuration
    Config,
}
