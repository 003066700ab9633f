//! Configuration loader and validator.
//!
//! Responsibilities:
//! - Read an optional YAML file into [`AuditConfig`]
//! - Apply environment overrides on top of file/defaults
//! - Validate constraints (e.g., `count_cap` must be > 0)
//!
//! Precedence, lowest first: defaults, YAML file, environment, CLI flags
//! (the binary applies flags after [`load`] returns and calls `validate` again).

pub mod model;

use crate::config::model::AuditConfig;
use crate::errors::{EngineError, Result};
use std::{fs, path::Path, path::PathBuf};
use tracing::{debug, info};

/// Load [`AuditConfig`] from `path` (if any) and apply ENV overrides.
///
/// Recognized variables: `QUALITY_BASE_DIR`, `QUALITY_SOURCE_ROOT`,
/// `QUALITY_WORKERS`, `QUALITY_REPORT_DIR`.
pub fn load(path: Option<&Path>) -> Result<AuditConfig> {
    let mut cfg = match path {
        Some(p) => {
            let raw = fs::read_to_string(p)?;
            let cfg: AuditConfig = serde_yml::from_str(&raw)?;
            info!(path = %p.display(), "config file loaded");
            cfg
        }
        None => AuditConfig::default(),
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    cfg.validate()?;
    Ok(cfg)
}

/// Apply overrides from a variable lookup (injected for tests).
fn apply_env_overrides<F>(cfg: &mut AuditConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("QUALITY_BASE_DIR") {
        debug!(value = %v, "env override: base_dir");
        cfg.paths.base_dir = PathBuf::from(v);
    }
    if let Some(v) = lookup("QUALITY_SOURCE_ROOT") {
        debug!(value = %v, "env override: source_root");
        cfg.paths.source_root = PathBuf::from(v);
    }
    if let Some(v) = lookup("QUALITY_REPORT_DIR") {
        debug!(value = %v, "env override: report_dir");
        cfg.output.report_dir = PathBuf::from(v);
    }
    if let Some(v) = lookup("QUALITY_WORKERS") {
        cfg.workers = v
            .trim()
            .parse()
            .map_err(|_| EngineError::Config(format!("QUALITY_WORKERS is not a number: {v}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn env_overrides_replace_defaults() {
        let vars: HashMap<&str, &str> = [
            ("QUALITY_BASE_DIR", "/srv/project"),
            ("QUALITY_WORKERS", "3"),
        ]
        .into_iter()
        .collect();

        let mut cfg = AuditConfig::default();
        apply_env_overrides(&mut cfg, |k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(cfg.paths.base_dir, PathBuf::from("/srv/project"));
        assert_eq!(cfg.workers, 3);
        assert_eq!(cfg.paths.source_root, PathBuf::from("src/main/java"));
    }

    #[test]
    fn non_numeric_workers_is_a_config_error() {
        let mut cfg = AuditConfig::default();
        let err = apply_env_overrides(&mut cfg, |k| {
            (k == "QUALITY_WORKERS").then(|| "many".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn yaml_file_is_merged_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quality.yml");
        fs::write(&path, "limits:\n  count_cap: 8\n  detail_threshold: 8\nworkers: 2\n").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let cfg: AuditConfig = serde_yml::from_str(&raw).unwrap();
        assert_eq!(cfg.limits.count_cap, 8);
        assert_eq!(cfg.limits.field_window_chars, 500);
        assert_eq!(cfg.workers, 2);
        assert!(cfg.validate().is_ok());
    }
}
