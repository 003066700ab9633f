//! Atomic file replacement.
//!
//! The new content goes to a temporary file in the target's directory and is
//! renamed over the target, so readers see either the old or the new file,
//! never a torn one. The original permissions are carried over.

use crate::errors::{AnnotateError, Result};
use std::{fs, io::Write, path::Path};
use tempfile::NamedTempFile;
use tracing::debug;

pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let perms = fs::metadata(path)
        .map_err(|e| AnnotateError::io(path, e))?
        .permissions();

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| AnnotateError::io(parent, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| AnnotateError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| AnnotateError::io(tmp.path(), e))?;
    tmp.as_file()
        .set_permissions(perms)
        .map_err(|e| AnnotateError::io(tmp.path(), e))?;

    tmp.persist(path).map_err(|e| AnnotateError::Persist {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "file replaced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_content_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("CFoo.java");
        fs::write(&file, "old").unwrap();

        write_atomic(&file, "new").unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_target_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_atomic(&dir.path().join("nope.java"), "x").unwrap_err();
        assert!(matches!(err, AnnotateError::Io { .. }));
    }
}
