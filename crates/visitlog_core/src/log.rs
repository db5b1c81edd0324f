//! The audit log manager.
//!
//! [`AuditLog`] owns the append-or-rotate policy over an injected
//! [`StorageGateway`]: every mutation re-reads the directory listing, decides
//! whether the latest segment still has room, and writes the full updated
//! content of exactly one file.

use crate::config::Config;
use crate::error::{AuditError, AuditResult};
use crate::record::{VisitorRecord, LINE_SEPARATOR};
use crate::segment::{discover_segments, segment_path, Segment, FIRST_SEGMENT_INDEX};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use visitlog_storage::StorageGateway;

/// Summary statistics for an audit log directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStats {
    /// Number of segment files.
    pub segment_count: usize,
    /// Total number of records across all segments.
    pub record_count: usize,
    /// Index of the highest-indexed segment, if any exist.
    pub latest_index: Option<u64>,
    /// Number of records in the highest-indexed segment.
    pub latest_entry_count: usize,
    /// Configured per-segment record capacity.
    pub max_entries_per_file: usize,
}

/// A segmented, append-only log of visitor records.
///
/// The log stores records as text lines across numbered segment files
/// (`audit_1.txt`, `audit_2.txt`, ...) inside one directory. Only the
/// highest-indexed segment ever changes; once a segment fills up to the
/// configured capacity, the next record starts a new file.
///
/// All storage access goes through the injected gateway, so the same manager
/// runs against the real file system or an in-memory double.
///
/// The manager serializes its own storage access, which makes a shared
/// instance safe to use from multiple threads. It does not coordinate with
/// other processes writing to the same directory.
pub struct AuditLog {
    directory: PathBuf,
    config: Config,
    gateway: Mutex<Box<dyn StorageGateway>>,
}

impl AuditLog {
    /// Creates a manager over `directory` with the default configuration.
    ///
    /// No storage access happens until the first operation.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, gateway: Box<dyn StorageGateway>) -> Self {
        Self {
            directory: directory.into(),
            config: Config::default(),
            gateway: Mutex::new(gateway),
        }
    }

    /// Creates a manager over `directory` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidConfig`] if `max_entries_per_file` is
    /// zero.
    pub fn with_config(
        directory: impl Into<PathBuf>,
        config: Config,
        gateway: Box<dyn StorageGateway>,
    ) -> AuditResult<Self> {
        if config.max_entries_per_file < 1 {
            return Err(AuditError::invalid_config(
                "max_entries_per_file must be at least 1",
            ));
        }
        Ok(Self {
            directory: directory.into(),
            config,
            gateway: Mutex::new(gateway),
        })
    }

    /// Returns the directory this manager operates on.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Appends one visitor record to the log.
    ///
    /// The record lands in the highest-indexed segment if it has room,
    /// otherwise in a newly created segment with the next index. An empty
    /// directory gets its first segment. Exactly one file is written per
    /// call. Failures before the write leave storage untouched; a failure
    /// during the write itself may leave that one file with either its old
    /// or partially new content, matching whatever the gateway's overwrite
    /// primitive does.
    ///
    /// # Errors
    ///
    /// Fails if the name is not representable ([`AuditError::InvalidRecord`]),
    /// if the directory holds a malformed or duplicated segment name, if
    /// rotation runs out of index space
    /// ([`AuditError::SegmentIndexOverflow`]), or if the gateway reports an
    /// I/O failure.
    pub fn add_record(&self, visitor_name: &str, time_of_visit: NaiveDateTime) -> AuditResult<()> {
        let record = VisitorRecord::new(visitor_name, time_of_visit)?;
        let line = record.to_line();

        let mut gateway = self.gateway.lock();
        let segments = discover_segments(&**gateway, &self.directory)?;

        let Some(current) = segments.last() else {
            let path = segment_path(&self.directory, FIRST_SEGMENT_INDEX);
            debug!("creating first segment {:?}", path);
            gateway.write_all_text(&path, &line)?;
            return Ok(());
        };

        let mut lines = gateway.read_lines(&current.path)?;
        if lines.len() < self.config.max_entries_per_file {
            lines.push(line);
            debug!(
                "appending entry {} of {} to segment {}",
                lines.len(),
                self.config.max_entries_per_file,
                current.index
            );
            gateway.write_all_text(&current.path, &lines.join(LINE_SEPARATOR))?;
        } else {
            // Discovery accepts arbitrary u64 indices, so the increment
            // must not wrap.
            let next_index = current.index.checked_add(1).ok_or(
                AuditError::SegmentIndexOverflow {
                    index: current.index,
                },
            )?;
            let next = segment_path(&self.directory, next_index);
            debug!(
                "segment {} is full, rotating to {:?}",
                current.index, next
            );
            gateway.write_all_text(&next, &line)?;
        }
        Ok(())
    }

    /// Returns the segments currently present, sorted by index.
    ///
    /// # Errors
    ///
    /// Fails on malformed or duplicated segment names, or on storage errors.
    pub fn segments(&self) -> AuditResult<Vec<Segment>> {
        let gateway = self.gateway.lock();
        discover_segments(&**gateway, &self.directory)
    }

    /// Reads every segment in index order along with its parsed records.
    ///
    /// # Errors
    ///
    /// Fails on discovery errors, on storage errors, and with
    /// [`AuditError::CorruptSegment`] if a segment holds a line that does not
    /// parse as a record.
    pub fn read_segments(&self) -> AuditResult<Vec<(Segment, Vec<VisitorRecord>)>> {
        let gateway = self.gateway.lock();
        let segments = discover_segments(&**gateway, &self.directory)?;

        let mut result = Vec::with_capacity(segments.len());
        for segment in segments {
            let lines = gateway.read_lines(&segment.path)?;
            let mut records = Vec::with_capacity(lines.len());
            for line in &lines {
                let record = VisitorRecord::parse_line(line).map_err(|err| match err {
                    AuditError::InvalidRecord { message } => {
                        AuditError::corrupt_segment(&segment.path, message)
                    }
                    other => other,
                })?;
                records.push(record);
            }
            result.push((segment, records));
        }
        Ok(result)
    }

    /// Reads back every record, oldest segment first.
    ///
    /// Within the limits of the naming convention this is append order.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`AuditLog::read_segments`].
    pub fn read_all(&self) -> AuditResult<Vec<VisitorRecord>> {
        Ok(self
            .read_segments()?
            .into_iter()
            .flat_map(|(_, records)| records)
            .collect())
    }

    /// Computes summary statistics for the log.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`AuditLog::read_segments`].
    pub fn stats(&self) -> AuditResult<LogStats> {
        let segments = self.read_segments()?;
        let record_count = segments.iter().map(|(_, records)| records.len()).sum();
        let latest = segments.last();
        Ok(LogStats {
            segment_count: segments.len(),
            record_count,
            latest_index: latest.map(|(segment, _)| segment.index),
            latest_entry_count: latest.map_or(0, |(_, records)| records.len()),
            max_entries_per_file: self.config.max_entries_per_file,
        })
    }
}

impl fmt::Debug for AuditLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLog")
            .field("directory", &self.directory)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
