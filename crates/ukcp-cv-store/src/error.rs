//! Errors from archive and uid-map persistence.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{path}: I/O error: {message}")]
    Io { path: PathBuf, message: String },

    #[error("{path}: parse error: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("corrupted archive: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub(crate) fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
