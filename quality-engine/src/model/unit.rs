//! Unit model: one source file identified by its fully-qualified dotted path.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A resolved unit. Immutable once built by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Position in the input list (0-based); the report keeps this order.
    pub index: usize,
    /// Fully-qualified identifier, e.g. `tech.derbent.activities.domain.CActivity`.
    pub id: String,
    /// Module segment (`activities`), empty for short identifiers.
    pub module: String,
    /// Architectural layer segment (`domain`, `service`, `view`, ...).
    pub layer: String,
    /// Trailing segment (`CActivity`).
    pub short_name: String,
    /// Backing file, `None` when no candidate path exists on disk.
    pub location: Option<PathBuf>,
}

/// What happened when the pipeline tried to read the unit's file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SourceStatus {
    /// File read and inspected.
    Present,
    /// No backing file; only name-based rules are evaluated.
    Absent,
    /// File exists but could not be read (permissions, encoding, size, timeout).
    /// Downstream it is treated exactly like [`SourceStatus::Absent`].
    Unreadable(String),
}

impl SourceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SourceStatus::Present => "present",
            SourceStatus::Absent => "absent",
            SourceStatus::Unreadable(_) => "unreadable",
        }
    }
}
