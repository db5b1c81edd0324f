//! Segment file naming and discovery.
//!
//! Segment files follow the `audit_<index>.txt` naming convention, where
//! `<index>` is a positive integer. Discovery turns a raw directory listing
//! into a view of the existing segments ordered by index. Ordering is by
//! parsed index, never by file name, so `audit_10.txt` sorts after
//! `audit_9.txt`.

use crate::error::{AuditError, AuditResult};
use std::path::{Path, PathBuf};
use visitlog_storage::StorageGateway;

/// File name prefix of every segment file.
pub const SEGMENT_PREFIX: &str = "audit_";

/// Extension given to newly created segment files.
///
/// Discovery does not check the extension: a foreign `audit_3.log` still
/// claims index 3.
pub const SEGMENT_EXTENSION: &str = "txt";

/// Index of the first segment created in an empty directory.
pub const FIRST_SEGMENT_INDEX: u64 = 1;

/// One discovered segment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Index parsed from the file name. Unique within a directory, at least
    /// [`FIRST_SEGMENT_INDEX`].
    pub index: u64,
    /// Path of the file as reported by the gateway.
    pub path: PathBuf,
}

/// Returns the file name of the segment with the given index.
#[must_use]
pub fn segment_file_name(index: u64) -> String {
    format!("{SEGMENT_PREFIX}{index}.{SEGMENT_EXTENSION}")
}

/// Returns the path of the segment with the given index inside `directory`.
#[must_use]
pub fn segment_path(directory: &Path, index: u64) -> PathBuf {
    directory.join(segment_file_name(index))
}

/// Extracts the segment index from a file path.
///
/// The file stem must be `audit_<index>` with a positive base-10 index.
/// Leading zeros are accepted (`audit_007` parses to index 7).
///
/// # Errors
///
/// Returns [`AuditError::MalformedSegmentName`] for any path that does not
/// follow the convention. A malformed name means the directory is corrupt or
/// holds a foreign file, so it is never silently skipped.
pub fn parse_segment_index(path: &Path) -> AuditResult<u64> {
    let malformed = || AuditError::malformed_segment_name(path);
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(malformed)?;
    let digits = stem.strip_prefix(SEGMENT_PREFIX).ok_or_else(malformed)?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(malformed());
    }
    let index: u64 = digits.parse().map_err(|_| malformed())?;
    if index < FIRST_SEGMENT_INDEX {
        return Err(malformed());
    }
    Ok(index)
}

/// Lists `directory` through the gateway and returns its segments sorted
/// ascending by index.
///
/// # Errors
///
/// Fails if the listing fails, if any entry has a malformed name, or if two
/// entries claim the same index.
pub fn discover_segments(
    gateway: &dyn StorageGateway,
    directory: &Path,
) -> AuditResult<Vec<Segment>> {
    let mut segments = Vec::new();
    for path in gateway.list_entries(directory)? {
        let index = parse_segment_index(&path)?;
        segments.push(Segment { index, path });
    }
    segments.sort_by_key(|segment| segment.index);
    for pair in segments.windows(2) {
        if pair[0].index == pair[1].index {
            return Err(AuditError::DuplicateSegmentIndex {
                index: pair[0].index,
                first: pair[0].path.clone(),
                second: pair[1].path.clone(),
            });
        }
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use visitlog_storage::{FsGateway, InMemoryGateway};

    #[test]
    fn file_name_for_index() {
        assert_eq!(segment_file_name(1), "audit_1.txt");
        assert_eq!(segment_file_name(42), "audit_42.txt");
    }

    #[test]
    fn path_for_index() {
        let path = segment_path(Path::new("audits"), 7);
        assert_eq!(path, Path::new("audits").join("audit_7.txt"));
    }

    #[test]
    fn parse_well_formed_names() {
        assert_eq!(parse_segment_index(Path::new("audits/audit_1.txt")).unwrap(), 1);
        assert_eq!(parse_segment_index(Path::new("audit_42.txt")).unwrap(), 42);
        // Extension is not part of the convention.
        assert_eq!(parse_segment_index(Path::new("audit_3.log")).unwrap(), 3);
        assert_eq!(parse_segment_index(Path::new("audit_10")).unwrap(), 10);
    }

    #[test]
    fn parse_accepts_leading_zeros() {
        assert_eq!(parse_segment_index(Path::new("audit_007.txt")).unwrap(), 7);
    }

    #[test]
    fn parse_rejects_foreign_names() {
        for name in [
            "notes.txt",
            "audit.txt",
            "audit_.txt",
            "audit_x.txt",
            "audit_1x.txt",
            "audit_-3.txt",
            "audit_1.2.txt",
            "my_audit_1.txt",
            "AUDIT_1.txt",
        ] {
            let result = parse_segment_index(Path::new(name));
            assert!(
                matches!(result, Err(AuditError::MalformedSegmentName { .. })),
                "{name}"
            );
        }
    }

    #[test]
    fn parse_rejects_index_zero() {
        let result = parse_segment_index(Path::new("audit_0.txt"));
        assert!(matches!(result, Err(AuditError::MalformedSegmentName { .. })));
    }

    #[test]
    fn discover_empty_directory() {
        let gateway = InMemoryGateway::new();
        let segments = discover_segments(&gateway, Path::new("audits")).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn discover_sorts_numerically() {
        // A lexicographic listing yields audit_1, audit_10, audit_2; the
        // discovered order must be numeric.
        let gateway = InMemoryGateway::with_files([
            ("audits/audit_10.txt", "j"),
            ("audits/audit_2.txt", "b"),
            ("audits/audit_1.txt", "a"),
        ]);

        let segments = discover_segments(&gateway, Path::new("audits")).unwrap();
        let indices: Vec<u64> = segments.iter().map(|segment| segment.index).collect();
        assert_eq!(indices, vec![1, 2, 10]);
    }

    #[test]
    fn discover_fails_on_malformed_name() {
        let gateway = InMemoryGateway::with_files([
            ("audits/audit_1.txt", "a"),
            ("audits/readme.txt", "not a segment"),
        ]);

        let result = discover_segments(&gateway, Path::new("audits"));
        assert!(matches!(
            result,
            Err(AuditError::MalformedSegmentName { .. })
        ));
    }

    #[test]
    fn discover_fails_on_duplicate_index() {
        let gateway = InMemoryGateway::with_files([
            ("audits/audit_2.log", "a"),
            ("audits/audit_2.txt", "b"),
        ]);

        let result = discover_segments(&gateway, Path::new("audits"));
        match result {
            Err(AuditError::DuplicateSegmentIndex { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected duplicate index error, got {other:?}"),
        }
    }

    #[test]
    fn discover_treats_leading_zeros_as_duplicates() {
        let gateway = InMemoryGateway::with_files([
            ("audits/audit_07.txt", "a"),
            ("audits/audit_7.txt", "b"),
        ]);

        let result = discover_segments(&gateway, Path::new("audits"));
        assert!(matches!(
            result,
            Err(AuditError::DuplicateSegmentIndex { index: 7, .. })
        ));
    }

    #[test]
    fn discover_propagates_storage_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("never-created");

        let result = discover_segments(&FsGateway::new(), &missing);
        assert!(matches!(result, Err(AuditError::Storage(_))));
    }
}
