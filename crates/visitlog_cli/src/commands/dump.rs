//! Dump command implementation.

use serde::Serialize;
use std::path::Path;
use visitlog_core::{AuditLog, TIMESTAMP_FORMAT};
use visitlog_storage::FsGateway;

/// One visit in dump output.
#[derive(Debug, Serialize)]
pub struct VisitInfo {
    /// Index of the segment holding the record.
    pub segment: u64,
    /// Visitor name.
    pub visitor: String,
    /// Time of the visit.
    pub time: String,
}

/// Runs the dump command.
pub fn run(
    path: &Path,
    limit: Option<usize>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = AuditLog::new(path, Box::new(FsGateway::new()));
    let max_records = limit.unwrap_or(usize::MAX);

    let mut visits = Vec::new();
    'segments: for (segment, records) in log.read_segments()? {
        for record in records {
            if visits.len() >= max_records {
                break 'segments;
            }
            visits.push(VisitInfo {
                segment: segment.index,
                visitor: record.visitor_name().to_owned(),
                time: record.time_of_visit().format(TIMESTAMP_FORMAT).to_string(),
            });
        }
    }

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&visits)?);
        }
        _ => {
            print_text_output(&visits);
        }
    }

    Ok(())
}

fn print_text_output(visits: &[VisitInfo]) {
    if visits.is_empty() {
        println!("No visits recorded");
        return;
    }
    for visit in visits {
        println!("[{}] {} at {}", visit.segment, visit.visitor, visit.time);
    }
    println!();
    println!("{} visit(s)", visits.len());
}
