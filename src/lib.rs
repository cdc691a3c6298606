//! kairos: dropping-odds anomaly detection for live football markets
//!
//! This library provides the core components for:
//! - Classifying odds tables as pre-match or live
//! - Inferring market type and its significance threshold
//! - Scanning live tables for the first significant drop
//! - Collecting pre-match baseline odds
//! - Suppressing anomalies that look like red-card repricing
//! - Scheduling analysis across live events and handing results to a
//!   narrative generator

pub mod cli;
pub mod config;
pub mod error;
pub mod market;
pub mod narrative;
pub mod normalize;
pub mod scheduler;
pub mod signal;
pub mod snapshot;
pub mod telemetry;
