//! Visitor records and their line format.
//!
//! Each record serializes to one text line of the form
//! `<visitor name>;<timestamp>`, with the timestamp rendered as ISO-8601 at
//! seconds precision and no timezone (`2019-04-09T13:00:00`). Lines within a
//! segment file are joined with CRLF.

use crate::error::{AuditError, AuditResult};
use chrono::NaiveDateTime;
use std::fmt;

/// Delimiter between the visitor name and the timestamp in a record line.
pub const RECORD_DELIMITER: char = ';';

/// Timestamp format used in record lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Separator between record lines within a segment file.
pub const LINE_SEPARATOR: &str = "\r\n";

/// A single visitor-entry event.
///
/// Names are written without quoting or escaping, so construction rejects
/// names that could not be read back unchanged: empty names and names
/// containing the delimiter or a line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorRecord {
    visitor_name: String,
    time_of_visit: NaiveDateTime,
}

impl VisitorRecord {
    /// Creates a record, validating the visitor name.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidRecord`] if the name is empty or contains
    /// `;`, `\r`, or `\n`.
    pub fn new(
        visitor_name: impl Into<String>,
        time_of_visit: NaiveDateTime,
    ) -> AuditResult<Self> {
        let visitor_name = visitor_name.into();
        if visitor_name.is_empty() {
            return Err(AuditError::invalid_record("visitor name is empty"));
        }
        if visitor_name.contains(RECORD_DELIMITER) {
            return Err(AuditError::invalid_record(format!(
                "visitor name {visitor_name:?} contains the {RECORD_DELIMITER:?} delimiter"
            )));
        }
        if visitor_name.contains(['\r', '\n']) {
            return Err(AuditError::invalid_record(format!(
                "visitor name {visitor_name:?} contains a line break"
            )));
        }
        Ok(Self {
            visitor_name,
            time_of_visit,
        })
    }

    /// Returns the visitor name.
    #[must_use]
    pub fn visitor_name(&self) -> &str {
        &self.visitor_name
    }

    /// Returns the time of the visit.
    #[must_use]
    pub const fn time_of_visit(&self) -> NaiveDateTime {
        self.time_of_visit
    }

    /// Serializes the record to its line form.
    #[must_use]
    pub fn to_line(&self) -> String {
        self.to_string()
    }

    /// Parses a record from its line form.
    ///
    /// The line is split at the first delimiter, so the timestamp part must
    /// not itself contain one.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidRecord`] if the delimiter is missing, the
    /// name part is invalid, or the timestamp does not match
    /// [`TIMESTAMP_FORMAT`].
    pub fn parse_line(line: &str) -> AuditResult<Self> {
        let (name, timestamp) = line.split_once(RECORD_DELIMITER).ok_or_else(|| {
            AuditError::invalid_record(format!(
                "missing {RECORD_DELIMITER:?} delimiter in line {line:?}"
            ))
        })?;
        let time_of_visit =
            NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|err| {
                AuditError::invalid_record(format!("bad timestamp {timestamp:?}: {err}"))
            })?;
        Self::new(name, time_of_visit)
    }
}

impl fmt::Display for VisitorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.visitor_name,
            RECORD_DELIMITER,
            self.time_of_visit.format(TIMESTAMP_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn record_serializes_to_line() {
        let record = VisitorRecord::new("Peter", ts("2019-04-09T13:00:00")).unwrap();
        assert_eq!(record.to_line(), "Peter;2019-04-09T13:00:00");
    }

    #[test]
    fn record_zero_pads_timestamp_fields() {
        let record = VisitorRecord::new("Jane", ts("2019-01-02T03:04:05")).unwrap();
        assert_eq!(record.to_line(), "Jane;2019-01-02T03:04:05");
    }

    #[test]
    fn record_line_round_trip() {
        let record = VisitorRecord::new("Alice", ts("2019-04-06T18:00:00")).unwrap();
        let parsed = VisitorRecord::parse_line(&record.to_line()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn record_parses_line() {
        let record = VisitorRecord::parse_line("Jack;2019-04-06T17:00:00").unwrap();
        assert_eq!(record.visitor_name(), "Jack");
        assert_eq!(record.time_of_visit(), ts("2019-04-06T17:00:00"));
    }

    #[test]
    fn record_name_may_contain_spaces() {
        let record = VisitorRecord::parse_line("Mary Ann;2019-04-06T17:00:00").unwrap();
        assert_eq!(record.visitor_name(), "Mary Ann");
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = VisitorRecord::new("", ts("2019-04-09T13:00:00"));
        assert!(matches!(result, Err(AuditError::InvalidRecord { .. })));
    }

    #[test]
    fn name_with_delimiter_is_rejected() {
        let result = VisitorRecord::new("Peter;admin", ts("2019-04-09T13:00:00"));
        assert!(matches!(result, Err(AuditError::InvalidRecord { .. })));
    }

    #[test]
    fn name_with_line_break_is_rejected() {
        for name in ["Pe\rter", "Pe\nter", "Peter\r\n"] {
            let result = VisitorRecord::new(name, ts("2019-04-09T13:00:00"));
            assert!(matches!(result, Err(AuditError::InvalidRecord { .. })));
        }
    }

    #[test]
    fn line_without_delimiter_fails_to_parse() {
        let result = VisitorRecord::parse_line("Peter 2019-04-09T13:00:00");
        assert!(matches!(result, Err(AuditError::InvalidRecord { .. })));
    }

    #[test]
    fn line_with_empty_name_fails_to_parse() {
        let result = VisitorRecord::parse_line(";2019-04-09T13:00:00");
        assert!(matches!(result, Err(AuditError::InvalidRecord { .. })));
    }

    #[test]
    fn line_with_bad_timestamp_fails_to_parse() {
        for line in [
            "Peter;2019-04-09",
            "Peter;13:00:00",
            "Peter;2019-04-09 13:00:00",
            "Peter;not-a-timestamp",
            "Peter;",
        ] {
            let result = VisitorRecord::parse_line(line);
            assert!(matches!(result, Err(AuditError::InvalidRecord { .. })), "{line}");
        }
    }

    #[test]
    fn line_with_extra_delimiter_fails_to_parse() {
        // The split happens at the first delimiter, so the remainder is not
        // a valid timestamp.
        let result = VisitorRecord::parse_line("Peter;Jane;2019-04-09T13:00:00");
        assert!(matches!(result, Err(AuditError::InvalidRecord { .. })));
    }
}
