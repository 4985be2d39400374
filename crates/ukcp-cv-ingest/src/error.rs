//! Ingest error taxonomy.
//!
//! Configuration errors are raised before any file is read; load errors at
//! the file that failed; CV and store errors come up from the layers below.

use std::path::PathBuf;
use ukcp_cv_kernel::CvError;
use ukcp_cv_store::StoreError;

/// Failure reading one raw vocabulary file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{path}: cannot read raw vocabulary: {message}")]
    Read { path: PathBuf, message: String },

    #[error("{path}: malformed JSON: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{path}: missing top-level key `{key}`")]
    MissingKey { path: PathBuf, key: String },

    #[error("{path}: value at `{key}` is not an object of terms")]
    NotAnObject { path: PathBuf, key: String },
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("vocab directory does not exist: {0}")]
    SourceMissing(PathBuf),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Cv(#[from] CvError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
