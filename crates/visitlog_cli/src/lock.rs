//! Audit directory locking.
//!
//! The core log manager leaves cross-process coordination to its caller, so
//! the CLI takes an advisory lock before writing. The audit directory itself
//! may hold nothing but segment files, so the lock file sits next to it:
//!
//! ```text
//! parent/
//! ├─ audits/           # segment files only
//! │  ├─ audit_1.txt
//! │  └─ audit_2.txt
//! └─ audits.lock       # advisory lock for single-writer
//! ```
//!
//! Read-only commands skip the lock; concurrent readers are safe because a
//! segment file is only ever replaced with a superset of its content.

use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOCK_SUFFIX: &str = ".lock";

/// Errors from acquiring the audit directory lock.
#[derive(Debug, Error)]
pub enum LockError {
    /// I/O failure while preparing the directory or lock file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Another process holds the lock.
    #[error("audit directory locked: another process has exclusive access")]
    Locked,

    /// The path exists but is not a directory.
    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Holds an exclusive advisory lock on an audit directory.
///
/// The lock is released when the value is dropped; the lock file itself is
/// left in place.
#[derive(Debug)]
pub struct AuditDirLock {
    path: PathBuf,
    _lock_file: File,
}

impl AuditDirLock {
    /// Creates the directory if needed and acquires an exclusive lock on it.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::Locked`] if another process holds the lock, and
    /// I/O errors from creating the directory or the lock file.
    pub fn acquire(path: &Path) -> Result<Self, LockError> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        if !path.is_dir() {
            return Err(LockError::NotADirectory(path.to_path_buf()));
        }

        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_file_path(path))?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(LockError::Locked);
        }

        Ok(Self {
            path: path.to_path_buf(),
            _lock_file: lock_file,
        })
    }

    /// Returns the locked directory.
    #[must_use]
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Returns the lock file path for an audit directory: the directory's own
/// name with `.lock` appended, in the parent directory.
fn lock_file_path(path: &Path) -> PathBuf {
    let file_name = match path.file_name() {
        Some(name) => {
            let mut name = name.to_os_string();
            name.push(LOCK_SUFFIX);
            name
        }
        None => OsString::from("visitlog.lock"),
    };
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn acquire_creates_directory() {
        let temp = tempdir().unwrap();
        let audit_path = temp.path().join("audits");

        assert!(!audit_path.exists());

        let lock = AuditDirLock::acquire(&audit_path).unwrap();
        assert!(audit_path.is_dir());
        assert_eq!(lock.path(), audit_path);
    }

    #[test]
    fn lock_file_stays_out_of_the_directory() {
        let temp = tempdir().unwrap();
        let audit_path = temp.path().join("audits");

        let _held = AuditDirLock::acquire(&audit_path).unwrap();

        assert!(temp.path().join("audits.lock").exists());
        assert_eq!(std::fs::read_dir(&audit_path).unwrap().count(), 0);
    }

    #[test]
    fn lock_prevents_second_acquire() {
        let temp = tempdir().unwrap();
        let audit_path = temp.path().join("audits");

        let _held = AuditDirLock::acquire(&audit_path).unwrap();

        let result = AuditDirLock::acquire(&audit_path);
        assert!(matches!(result, Err(LockError::Locked)));
    }

    #[test]
    fn lock_released_on_drop() {
        let temp = tempdir().unwrap();
        let audit_path = temp.path().join("audits");

        {
            let _held = AuditDirLock::acquire(&audit_path).unwrap();
        }

        let _reacquired = AuditDirLock::acquire(&audit_path).unwrap();
    }

    #[test]
    fn acquire_fails_on_file_path() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("not-a-directory");
        std::fs::write(&file_path, "plain file").unwrap();

        let result = AuditDirLock::acquire(&file_path);
        assert!(matches!(result, Err(LockError::NotADirectory(_))));
    }
}
