//! Configuration types for kairos

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;
use crate::market::ThresholdPolicy;
use crate::snapshot::ViewLimits;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: ThresholdPolicy,
    #[serde(default)]
    pub red_card: RedCardConfig,
    #[serde(default)]
    pub narrative: NarrativeConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Red-card heuristic configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedCardConfig {
    /// Absolute drop that counts as "big"
    #[serde(default = "default_big_drop_magnitude")]
    pub big_drop_magnitude: Decimal,

    /// Big-drop rows a table needs to raise an indicator
    #[serde(default = "default_min_big_drop_rows")]
    pub min_big_drop_rows: usize,

    /// Share of placeholder rows a selection column must exceed
    #[serde(default = "default_suspension_ratio")]
    pub suspension_ratio: Decimal,

    /// Indicators across the batch that mark it event-driven
    #[serde(default = "default_min_indicators")]
    pub min_indicators: usize,
}

fn default_big_drop_magnitude() -> Decimal {
    Decimal::new(80, 2) // 0.80
}
fn default_min_big_drop_rows() -> usize {
    3
}
fn default_suspension_ratio() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_min_indicators() -> usize {
    2
}

impl Default for RedCardConfig {
    fn default() -> Self {
        Self {
            big_drop_magnitude: default_big_drop_magnitude(),
            min_big_drop_rows: default_min_big_drop_rows(),
            suspension_ratio: default_suspension_ratio(),
            min_indicators: default_min_indicators(),
        }
    }
}

/// Narrative payload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Tables up to this many rows are sent in full
    #[serde(default = "default_max_full_rows")]
    pub max_full_rows: usize,

    /// Head/tail rows kept from larger tables
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,
}

fn default_max_full_rows() -> usize {
    10
}
fn default_sample_rows() -> usize {
    3
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            max_full_rows: default_max_full_rows(),
            sample_rows: default_sample_rows(),
        }
    }
}

impl From<&NarrativeConfig> for ViewLimits {
    fn from(config: &NarrativeConfig) -> Self {
        Self {
            max_full_rows: config.max_full_rows,
            sample_rows: config.sample_rows,
        }
    }
}

/// Analysis loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between analysis cycles
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Events analysed at the same time
    #[serde(default = "default_max_concurrent_events")]
    pub max_concurrent_events: usize,

    /// Delay before starting each event after the first in a cycle
    #[serde(default)]
    pub pause_between_events_ms: u64,
}

fn default_interval_secs() -> u64 {
    60
}
fn default_max_concurrent_events() -> usize {
    4
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_concurrent_events: default_max_concurrent_events(),
            pause_between_events_ms: 0,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| CollaboratorError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Limits for tables handed to the narrative generator
    pub fn view_limits(&self) -> ViewLimits {
        ViewLimits::from(&self.narrative)
    }
}
