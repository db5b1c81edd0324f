//! In-memory storage gateway for testing.

use crate::error::{StorageError, StorageResult};
use crate::gateway::StorageGateway;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An in-memory storage gateway.
///
/// This gateway keeps file contents in a map keyed by path and is suitable
/// for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral logs that don't need persistence
///
/// # Thread Safety
///
/// This gateway is thread-safe. Clones share the same underlying files, so a
/// test can keep one handle for assertions after handing another to a
/// manager.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use visitlog_storage::{InMemoryGateway, StorageGateway};
///
/// let mut gateway = InMemoryGateway::new();
/// let path = Path::new("audits/audit_1.txt");
/// gateway.write_all_text(path, "Peter;2019-04-09T13:00:00").unwrap();
/// assert_eq!(
///     gateway.read_lines(path).unwrap(),
///     vec!["Peter;2019-04-09T13:00:00"]
/// );
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryGateway {
    files: Arc<RwLock<BTreeMap<PathBuf, String>>>,
}

impl InMemoryGateway {
    /// Creates a new empty in-memory gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory gateway pre-populated with files.
    ///
    /// Useful for testing discovery over an existing directory.
    pub fn with_files<I, P, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: Into<String>,
    {
        let map = files
            .into_iter()
            .map(|(path, content)| (path.into(), content.into()))
            .collect();
        Self {
            files: Arc::new(RwLock::new(map)),
        }
    }

    /// Returns a copy of the content of the file at `path`, if present.
    ///
    /// Useful for asserting on exactly what was written.
    #[must_use]
    pub fn content(&self, path: &Path) -> Option<String> {
        self.files.read().get(path).cloned()
    }

    /// Returns the number of files held by the gateway.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.read().len()
    }

    /// Removes all files from the gateway.
    pub fn clear(&mut self) {
        self.files.write().clear();
    }
}

impl StorageGateway for InMemoryGateway {
    fn list_entries(&self, directory: &Path) -> StorageResult<Vec<PathBuf>> {
        let files = self.files.read();
        Ok(files
            .keys()
            .filter(|path| path.parent() == Some(directory))
            .cloned()
            .collect())
    }

    fn read_lines(&self, path: &Path) -> StorageResult<Vec<String>> {
        let files = self.files.read();
        match files.get(path) {
            Some(content) => Ok(content.lines().map(ToOwned::to_owned).collect()),
            None => Err(StorageError::file_not_found(path)),
        }
    }

    fn write_all_text(&mut self, path: &Path, content: &str) -> StorageResult<()> {
        self.files
            .write()
            .insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }
}
