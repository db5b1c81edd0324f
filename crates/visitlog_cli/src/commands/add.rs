//! Add command implementation.

use crate::lock::AuditDirLock;
use chrono::{NaiveDateTime, Timelike, Utc};
use std::path::Path;
use tracing::info;
use visitlog_core::{segment_file_name, AuditLog, Config, TIMESTAMP_FORMAT};
use visitlog_storage::FsGateway;

/// Runs the add command.
///
/// Takes the directory lock, appends one record, and reports where it
/// landed. `time` must match [`TIMESTAMP_FORMAT`]; when absent, the current
/// UTC time truncated to seconds is used.
pub fn run(
    path: &Path,
    name: &str,
    time: Option<&str>,
    max_entries: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let time_of_visit = match time {
        Some(text) => NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
            .map_err(|err| format!("Invalid --time {text:?}: {err}"))?,
        None => Utc::now()
            .naive_utc()
            .with_nanosecond(0)
            .ok_or("failed to truncate the current time")?,
    };

    info!("Recording visit in {:?}", path);
    let _lock = AuditDirLock::acquire(path)?;

    let log = AuditLog::with_config(
        path,
        Config::new().max_entries_per_file(max_entries),
        Box::new(FsGateway::new()),
    )?;
    log.add_record(name, time_of_visit)?;

    let stats = log.stats()?;
    println!(
        "Recorded visit by {} at {}",
        name,
        time_of_visit.format(TIMESTAMP_FORMAT)
    );
    if let Some(index) = stats.latest_index {
        println!(
            "Segment {} now holds {} of {} entries",
            segment_file_name(index),
            stats.latest_entry_count,
            stats.max_entries_per_file
        );
    }

    Ok(())
}
