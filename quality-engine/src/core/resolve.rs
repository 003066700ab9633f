//! Unit Resolver: identifier list → [`Unit`] records with file locations.
//!
//! A missing file is a valid, reportable state (`location: None`), never an error.
//! The only fatal condition in this module is an unreadable unit list.

use crate::{
    config::model::PathConfig,
    errors::{EngineError, Result},
    model::unit::Unit,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Read the unit list: one identifier per line, blank lines and `#` comments skipped.
pub fn read_unit_list(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path).map_err(|source| EngineError::InputList {
        path: path.to_path_buf(),
        source,
    })?;
    let ids = parse_unit_list(&raw);
    info!(path = %path.display(), units = ids.len(), "unit list loaded");
    Ok(ids)
}

/// Parse list text into identifiers (pure).
pub fn parse_unit_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// `(module, layer, short_name)` of a dotted identifier.
pub fn split_identifier(id: &str, module_segment_index: usize) -> (String, String, String) {
    let parts: Vec<&str> = id.split('.').collect();
    let short = parts.last().copied().unwrap_or_default().to_string();
    let layer = if parts.len() > 1 {
        parts[parts.len() - 2].to_string()
    } else {
        String::new()
    };
    // The trailing segment is never a module.
    let module = if module_segment_index + 1 < parts.len() {
        parts[module_segment_index].to_string()
    } else {
        String::new()
    };
    (module, layer, short)
}

/// Candidate files for an identifier, in preference order.
pub fn candidate_paths(id: &str, paths: &PathConfig) -> Vec<PathBuf> {
    let rel = format!("{}.{}", id.replace('.', "/"), paths.extension);
    vec![
        paths.base_dir.join(&paths.source_root).join(&rel),
        paths.base_dir.join(&rel),
    ]
}

/// Resolve one identifier.
pub fn resolve(id: &str, index: usize, paths: &PathConfig) -> Unit {
    let (module, layer, short_name) = split_identifier(id, paths.module_segment_index);
    let location = candidate_paths(id, paths).into_iter().find(|p| p.is_file());
    if location.is_none() {
        debug!(unit = %id, "resolve: no backing file");
    }
    Unit {
        index,
        id: id.to_string(),
        module,
        layer,
        short_name,
        location,
    }
}

/// Where a unit test for `unit` may live: next to the source file, or mirrored
/// under the test root.
pub fn test_candidates(unit: &Unit, paths: &PathConfig) -> Vec<PathBuf> {
    let file_name = format!("{}Test.{}", unit.short_name, paths.extension);
    let mut out = Vec::with_capacity(2);
    if let Some(dir) = unit.location.as_deref().and_then(Path::parent) {
        out.push(dir.join(&file_name));
    }
    let package: Vec<&str> = unit.id.split('.').collect();
    if package.len() > 1 {
        let pkg_dir = package[..package.len() - 1].join("/");
        out.push(
            paths
                .base_dir
                .join(&paths.test_root)
                .join(pkg_dir)
                .join(&file_name),
        );
    }
    out
}
