//! Crate-wide error type for the analysis engine.
//!
//! Only unrecoverable conditions live here. Missing or unreadable source files
//! are data (`SourceStatus`), not errors, and never surface through this type.

use std::path::PathBuf;
use thiserror::Error;

/// Convenient alias for engine results.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The unit list could not be opened or read. Fatal for a run.
    #[error("cannot read unit list {}: {source}", path.display())]
    InputList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("serde json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
