//! Verify command implementation.

use std::path::Path;
use visitlog_core::{parse_segment_index, VisitorRecord, FIRST_SEGMENT_INDEX};
use visitlog_storage::{FsGateway, StorageGateway};

/// Verification result.
#[derive(Debug)]
pub struct VerifyResult {
    /// Number of segment files checked.
    pub segments_checked: usize,
    /// Number of record lines checked.
    pub records_checked: usize,
    /// Number of valid record lines.
    pub valid_records: usize,
    /// Number of corrupt record lines.
    pub corrupt_records: usize,
    /// List of problems found.
    pub errors: Vec<String>,
}

impl VerifyResult {
    fn new() -> Self {
        Self {
            segments_checked: 0,
            records_checked: 0,
            valid_records: 0,
            corrupt_records: 0,
            errors: Vec::new(),
        }
    }

    fn is_ok(&self) -> bool {
        self.corrupt_records == 0 && self.errors.is_empty()
    }
}

/// Runs the verify command.
///
/// Unlike the read path, which fails on the first problem, verification
/// keeps going and reports everything it finds.
pub fn run(path: &Path, max_entries: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("Verifying audit directory {:?}", path);
    println!();

    if !path.exists() {
        println!("Audit directory not found (no visits recorded yet)");
        return Ok(());
    }

    let result = verify_directory(&FsGateway::new(), path, max_entries)?;
    print_result(&result);

    println!();
    if result.is_ok() {
        println!("✓ Audit log verification passed");
        Ok(())
    } else {
        println!("✗ Audit log verification failed");
        Err("Verification failed".into())
    }
}

fn verify_directory(
    gateway: &dyn StorageGateway,
    path: &Path,
    max_entries: usize,
) -> Result<VerifyResult, Box<dyn std::error::Error>> {
    let mut result = VerifyResult::new();

    let mut segments = Vec::new();
    for entry in gateway.list_entries(path)? {
        match parse_segment_index(&entry) {
            Ok(index) => segments.push((index, entry)),
            Err(err) => result.errors.push(err.to_string()),
        }
    }
    segments.sort_by_key(|(index, _)| *index);

    for pair in segments.windows(2) {
        if pair[0].0 == pair[1].0 {
            result.errors.push(format!(
                "duplicate segment index {}: {:?} and {:?}",
                pair[0].0, pair[0].1, pair[1].1
            ));
        }
    }

    // Gaps come from adjacent pairs of the sorted list, so one stray
    // high index costs one report, not one per absent index.
    if let Some((first, _)) = segments.first() {
        if *first > FIRST_SEGMENT_INDEX {
            result
                .errors
                .push(missing_range(FIRST_SEGMENT_INDEX, *first - 1));
        }
    }
    for pair in segments.windows(2) {
        if pair[1].0 - pair[0].0 > 1 {
            result.errors.push(missing_range(pair[0].0 + 1, pair[1].0 - 1));
        }
    }

    let latest = segments.last().map(|(index, _)| *index);
    for (index, segment_path) in &segments {
        result.segments_checked += 1;
        let lines = match gateway.read_lines(segment_path) {
            Ok(lines) => lines,
            Err(err) => {
                result
                    .errors
                    .push(format!("failed to read {segment_path:?}: {err}"));
                continue;
            }
        };

        if lines.is_empty() {
            result.errors.push(format!("{segment_path:?} is empty"));
        }
        if lines.len() > max_entries {
            result.errors.push(format!(
                "{:?} holds {} records, capacity is {}",
                segment_path,
                lines.len(),
                max_entries
            ));
        }
        // Every segment but the latest was sealed when it filled up.
        if Some(*index) != latest && lines.len() < max_entries {
            result.errors.push(format!(
                "{:?} holds {} records but was sealed before reaching capacity {}",
                segment_path,
                lines.len(),
                max_entries
            ));
        }

        for (line_number, line) in lines.iter().enumerate() {
            result.records_checked += 1;
            match VisitorRecord::parse_line(line) {
                Ok(_) => result.valid_records += 1,
                Err(err) => {
                    result.corrupt_records += 1;
                    result.errors.push(format!(
                        "{:?} line {}: {}",
                        segment_path,
                        line_number + 1,
                        err
                    ));
                }
            }
        }
    }

    Ok(result)
}

fn missing_range(first: u64, last: u64) -> String {
    if first == last {
        format!("missing segment index {first}")
    } else {
        format!("missing segment indices {first} through {last}")
    }
}

fn print_result(result: &VerifyResult) {
    println!(
        "  segments checked: {}, records checked: {}, valid: {}, corrupt: {}",
        result.segments_checked,
        result.records_checked,
        result.valid_records,
        result.corrupt_records
    );
    for error in &result.errors {
        println!("    ERROR: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visitlog_storage::InMemoryGateway;

    #[test]
    fn clean_directory_passes() {
        let gateway = InMemoryGateway::with_files([
            ("audits/audit_1.txt", "Peter;2019-04-06T16:30:00\r\nJane;2019-04-06T16:40:00"),
            ("audits/audit_2.txt", "Jack;2019-04-06T17:00:00"),
        ]);

        let result = verify_directory(&gateway, Path::new("audits"), 2).unwrap();

        assert!(result.is_ok());
        assert_eq!(result.segments_checked, 2);
        assert_eq!(result.records_checked, 3);
        assert_eq!(result.valid_records, 3);
    }

    #[test]
    fn findings_are_collected_not_fatal() {
        let gateway = InMemoryGateway::with_files([
            ("audits/audit_1.txt", "Peter;2019-04-06T16:30:00"),
            ("audits/audit_3.txt", "garbage line"),
            ("audits/notes.txt", "foreign file"),
        ]);

        let result = verify_directory(&gateway, Path::new("audits"), 5).unwrap();

        assert!(!result.is_ok());
        // Foreign name, missing audit_2, underfull audit_1, unparseable line.
        assert_eq!(result.errors.len(), 4);
        assert_eq!(result.corrupt_records, 1);
        assert_eq!(result.valid_records, 1);
        assert_eq!(result.segments_checked, 2);
    }

    #[test]
    fn distant_index_gap_is_reported_as_a_range() {
        // One stray high-index file costs one finding, not a walk over
        // every absent index.
        let gateway = InMemoryGateway::with_files([
            ("audits/audit_1.txt", "Peter;2019-04-06T16:30:00"),
            ("audits/audit_4000000000000000000.txt", "Jane;2019-04-06T16:40:00"),
        ]);

        let result = verify_directory(&gateway, Path::new("audits"), 1).unwrap();

        assert!(!result.is_ok());
        assert_eq!(
            result.errors,
            vec!["missing segment indices 2 through 3999999999999999999"]
        );
        assert_eq!(result.valid_records, 2);
    }

    #[test]
    fn leading_gap_is_reported() {
        let gateway =
            InMemoryGateway::with_files([("audits/audit_5.txt", "Peter;2019-04-06T16:30:00")]);

        let result = verify_directory(&gateway, Path::new("audits"), 1).unwrap();

        assert_eq!(result.errors, vec!["missing segment indices 1 through 4"]);
    }

    #[test]
    fn duplicate_and_overfull_segments_are_reported() {
        let gateway = InMemoryGateway::with_files([
            ("audits/audit_1.log", "Peter;2019-04-06T16:30:00"),
            ("audits/audit_1.txt", "Jane;2019-04-06T16:40:00\r\nJack;2019-04-06T17:00:00"),
        ]);

        let result = verify_directory(&gateway, Path::new("audits"), 1).unwrap();

        assert!(!result.is_ok());
        assert!(result.errors.iter().any(|error| error.contains("duplicate")));
        assert!(result.errors.iter().any(|error| error.contains("capacity")));
        assert_eq!(result.valid_records, 3);
    }
}
