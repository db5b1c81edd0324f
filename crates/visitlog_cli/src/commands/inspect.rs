//! Inspect command implementation.

use serde::Serialize;
use std::path::Path;
use visitlog_core::{segment_file_name, AuditLog, Config};
use visitlog_storage::FsGateway;

/// Audit log inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Audit directory path.
    pub path: String,
    /// Number of segment files.
    pub segment_count: usize,
    /// Total number of records.
    pub record_count: usize,
    /// File name of the latest segment, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_segment: Option<String>,
    /// Number of records in the latest segment.
    pub latest_entry_count: usize,
    /// Configured per-segment capacity.
    pub max_entries_per_file: usize,
    /// Per-segment details (if requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentInfo>>,
}

/// Details for a single segment.
#[derive(Debug, Serialize)]
pub struct SegmentInfo {
    /// Segment index.
    pub index: u64,
    /// Segment file name.
    pub file: String,
    /// Number of records in the segment.
    pub records: usize,
}

/// Runs the inspect command.
pub fn run(
    path: &Path,
    show_segments: bool,
    max_entries: usize,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = AuditLog::with_config(
        path,
        Config::new().max_entries_per_file(max_entries),
        Box::new(FsGateway::new()),
    )?;
    let stats = log.stats()?;

    let mut result = InspectResult {
        path: path.display().to_string(),
        segment_count: stats.segment_count,
        record_count: stats.record_count,
        latest_segment: stats.latest_index.map(segment_file_name),
        latest_entry_count: stats.latest_entry_count,
        max_entries_per_file: stats.max_entries_per_file,
        segments: None,
    };

    if show_segments {
        let details = log
            .read_segments()?
            .into_iter()
            .map(|(segment, records)| SegmentInfo {
                index: segment.index,
                file: segment_file_name(segment.index),
                records: records.len(),
            })
            .collect();
        result.segments = Some(details);
    }

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("Audit Log Inspection");
    println!("====================");
    println!();
    println!("Path: {}", result.path);
    println!();
    println!("Segments:");
    println!("  Count:    {}", result.segment_count);
    match &result.latest_segment {
        Some(name) => println!(
            "  Latest:   {} ({} of {} entries)",
            name, result.latest_entry_count, result.max_entries_per_file
        ),
        None => println!("  Latest:   none"),
    }
    println!();
    println!("Records:");
    println!("  Total:    {}", result.record_count);

    if let Some(segments) = &result.segments {
        println!();
        println!("Per segment:");
        for segment in segments {
            println!("  {} - {} record(s)", segment.file, segment.records);
        }
    }
}
