//! Configuration data structures for the quality analysis pipeline.
//!
//! Groups:
//! - [`AuditConfig`] : top-level container for all config groups
//! - [`PathConfig`]  : where units live on disk and how identifiers map to files
//! - [`Limits`]      : caps, windows and timeouts used by rules and the injector
//! - [`OutputConfig`]: where report artifacts are written
//!
//! All structs are `serde`-friendly so they can be loaded from YAML.
//! The numeric limits are empirically tuned; changing them changes reported counts.

use crate::errors::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Source tree layout and identifier resolution.
    pub paths: PathConfig,
    /// Counting caps, look-back windows and I/O limits.
    pub limits: Limits,
    /// Report destination.
    pub output: OutputConfig,
    /// Size of the worker pool (units evaluated concurrently).
    pub workers: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            paths: PathConfig::default(),
            limits: Limits::default(),
            output: OutputConfig::default(),
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }
}

impl AuditConfig {
    /// Validate config sanity (no degenerate or absurd values).
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(EngineError::Config("`workers` must be greater than 0".into()));
        }
        if self.limits.count_cap == 0 {
            return Err(EngineError::Config("`count_cap` must be greater than 0".into()));
        }
        if self.limits.detail_threshold == 0 || self.limits.detail_threshold > self.limits.count_cap
        {
            return Err(EngineError::Config(format!(
                "`detail_threshold` must be within 1..={}, got {}",
                self.limits.count_cap, self.limits.detail_threshold
            )));
        }
        if self.limits.field_window_chars == 0 {
            return Err(EngineError::Config(
                "`field_window_chars` must be greater than 0".into(),
            ));
        }
        if self.limits.marker_window_lines == 0 {
            return Err(EngineError::Config(
                "`marker_window_lines` must be greater than 0".into(),
            ));
        }
        if self.limits.max_markers_per_rule == 0 {
            return Err(EngineError::Config(
                "`max_markers_per_rule` must be greater than 0".into(),
            ));
        }
        if self.limits.max_file_bytes == 0 {
            return Err(EngineError::Config("`max_file_bytes` must be greater than 0".into()));
        }
        if self.limits.read_timeout_ms == 0 {
            return Err(EngineError::Config("`read_timeout_ms` must be greater than 0".into()));
        }
        if self.paths.extension.trim().is_empty() {
            return Err(EngineError::Config("`extension` must not be empty".into()));
        }
        Ok(())
    }
}

/// How fully-qualified identifiers map onto the source tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Project root; all other paths are relative to it.
    pub base_dir: PathBuf,
    /// Main source root (`src/main/java`).
    pub source_root: PathBuf,
    /// Test source root mirrored when looking for unit tests.
    pub test_root: PathBuf,
    /// Source file extension without the dot.
    pub extension: String,
    /// Dotted segment holding the module name (`tech.derbent.<module>`).
    pub module_segment_index: usize,
    /// Layer segments considered part of the standard package structure.
    pub known_layers: Vec<String>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            source_root: PathBuf::from("src/main/java"),
            test_root: PathBuf::from("src/test/java"),
            extension: "java".into(),
            module_segment_index: 2,
            known_layers: [
                "domain",
                "service",
                "view",
                "config",
                "api",
                "utils",
                "interfaces",
                "components",
                "dialogs",
                "base",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Caps and windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Highest count reported for one (unit, rule) pair; rendered as `10+`.
    pub count_cap: u8,
    /// Count at which field-level details are emitted into the detail sheet.
    pub detail_threshold: u8,
    /// Characters looked back from a field declaration for its annotations.
    pub field_window_chars: usize,
    /// Lines above an anchor scanned for an equivalent marker.
    pub marker_window_lines: usize,
    /// Marker insertions allowed per rule per file.
    pub max_markers_per_rule: usize,
    /// Larger files are treated as unreadable.
    pub max_file_bytes: u64,
    /// Per-file read timeout.
    pub read_timeout_ms: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            count_cap: 10,
            detail_threshold: 10,
            field_window_chars: 500,
            marker_window_lines: 5,
            max_markers_per_rule: 10,
            max_file_bytes: 2 * 1024 * 1024, // 2 MB
            read_timeout_ms: 5_000,
        }
    }
}

/// Report destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the matrix, details and summary artifacts.
    pub report_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("docs/quality"),
        }
    }
}
