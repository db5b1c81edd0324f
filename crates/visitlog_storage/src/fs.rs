//! Filesystem-backed storage gateway.

use crate::error::{StorageError, StorageResult};
use crate::gateway::StorageGateway;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A storage gateway backed by the local filesystem.
///
/// Data survives process restarts.
///
/// # Durability
///
/// `write_all_text` hands the content to the OS; it does not fsync. A crash
/// immediately after a write may leave either the old or the new content,
/// which is the durability level the audit log core is designed for.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use visitlog_storage::{FsGateway, StorageGateway};
///
/// let mut gateway = FsGateway::new();
/// gateway
///     .write_all_text(Path::new("audits/audit_1.txt"), "Peter;2019-04-09T13:00:00")
///     .unwrap();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FsGateway;

impl FsGateway {
    /// Creates a new filesystem gateway.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl StorageGateway for FsGateway {
    fn list_entries(&self, directory: &Path) -> StorageResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(directory)? {
            let path = entry?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    fn read_lines(&self, path: &Path) -> StorageResult<Vec<String>> {
        let content = fs::read_to_string(path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                StorageError::file_not_found(path)
            } else {
                StorageError::Io(err)
            }
        })?;
        Ok(content.lines().map(ToOwned::to_owned).collect())
    }

    fn write_all_text(&mut self, path: &Path, content: &str) -> StorageResult<()> {
        fs::write(path, content)?;
        Ok(())
    }
}
