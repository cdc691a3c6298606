//! Collaborator errors
//!
//! Value-level problems inside the engine are skips, not errors. These cover
//! the collaborators around it. Provider and narrative failures are reported
//! per event; configuration failures surface from `Config::load`.

use thiserror::Error;

/// Failure of a collaborator around the engine
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Table provider could not supply a batch
    #[error("Table provider error: {0}")]
    Provider(String),

    /// Narrative generation failed
    #[error("Narrative generator error: {0}")]
    Narrative(String),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis task panicked or was cancelled
    #[error("Analysis task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CollaboratorError>;
