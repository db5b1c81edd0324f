//! Error types for storage gateway operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage gateway operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage gateway operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested file does not exist.
    #[error("file not found: {path:?}")]
    FileNotFound {
        /// The path that was requested.
        path: PathBuf,
    },
}

impl StorageError {
    /// Creates a file-not-found error for the given path.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
