use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnnotateError>;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

impl AnnotateError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        AnnotateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
