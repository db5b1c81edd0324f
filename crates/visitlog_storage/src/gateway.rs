//! Storage gateway trait definition.

use crate::error::StorageResult;
use std::path::{Path, PathBuf};

/// The storage capability consumed by the audit log core.
///
/// Gateways are **opaque path-and-text stores**. They list the files of a
/// directory, read a file as ordered text lines, and replace a file's entire
/// content. The audit log core owns all interpretation of file names and line
/// contents - gateways do not understand segments or records.
///
/// # Invariants
///
/// - `list_entries` returns every regular file in the directory, in no
///   particular order
/// - `read_lines` reflects the file content at call time, with line
///   terminators stripped
/// - `write_all_text` replaces the full file content (overwrite, not append)
/// - Gateways must be `Send + Sync` so a manager holding one can be shared
///   across threads
///
/// # Implementors
///
/// - [`super::InMemoryGateway`] - For testing
/// - [`super::FsGateway`] - For persistent storage
pub trait StorageGateway: Send + Sync {
    /// Lists every regular file in `directory`.
    ///
    /// Subdirectories are not included. The order of the returned paths is
    /// unspecified; callers impose their own ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list_entries(&self, directory: &Path) -> StorageResult<Vec<PathBuf>>;

    /// Reads the ordered text lines of the file at `path`.
    ///
    /// Both `\n` and `\r\n` terminate a line; terminators are not part of the
    /// returned strings. An empty file yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - The file cannot be read as text
    fn read_lines(&self, path: &Path) -> StorageResult<Vec<String>>;

    /// Replaces the entire content of the file at `path` with `content`.
    ///
    /// The file is created if it does not exist and truncated if it does.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write_all_text(&mut self, path: &Path, content: &str) -> StorageResult<()>;
}
