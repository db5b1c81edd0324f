//! Error types for the audit log engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for audit log operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Errors that can occur in audit log operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Storage gateway error.
    #[error("storage error: {0}")]
    Storage(#[from] visitlog_storage::StorageError),

    /// A file in the audit directory does not follow the `audit_<index>`
    /// naming convention.
    #[error("malformed segment file name: {path:?}")]
    MalformedSegmentName {
        /// The offending path.
        path: PathBuf,
    },

    /// Two files in the audit directory claim the same segment index.
    #[error("duplicate segment index {index}: {first:?} and {second:?}")]
    DuplicateSegmentIndex {
        /// The contested index.
        index: u64,
        /// The first file with this index.
        first: PathBuf,
        /// The second file with this index.
        second: PathBuf,
    },

    /// The full latest segment already carries the greatest representable
    /// index, so no rotation target exists.
    #[error("segment index space exhausted at index {index}")]
    SegmentIndexOverflow {
        /// The index of the full segment.
        index: u64,
    },

    /// Configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// Record cannot be represented in the line format.
    #[error("invalid record: {message}")]
    InvalidRecord {
        /// Description of the problem.
        message: String,
    },

    /// A segment file holds a line that does not parse as a record.
    #[error("corrupt segment {path:?}: {message}")]
    CorruptSegment {
        /// The segment file.
        path: PathBuf,
        /// Description of the corruption.
        message: String,
    },
}

impl AuditError {
    /// Creates a malformed segment name error.
    pub fn malformed_segment_name(path: impl Into<PathBuf>) -> Self {
        Self::MalformedSegmentName { path: path.into() }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates an invalid record error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Creates a corrupt segment error.
    pub fn corrupt_segment(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptSegment {
            path: path.into(),
            message: message.into(),
        }
    }
}
