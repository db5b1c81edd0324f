//! # visitlog Core
//!
//! Segmented append-only audit log engine.
//!
//! This crate provides:
//! - The visitor record line format (`<name>;<timestamp>`)
//! - Segment file naming and discovery (`audit_1.txt`, `audit_2.txt`, ...)
//! - [`AuditLog`], the append-or-rotate manager over an injected
//!   [`StorageGateway`](visitlog_storage::StorageGateway)
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use visitlog_core::{AuditLog, Config};
//! use visitlog_storage::InMemoryGateway;
//!
//! let log = AuditLog::with_config(
//!     "audits",
//!     Config::new().max_entries_per_file(3),
//!     Box::new(InMemoryGateway::new()),
//! )
//! .unwrap();
//!
//! let time = NaiveDate::from_ymd_opt(2019, 4, 9)
//!     .unwrap()
//!     .and_hms_opt(13, 0, 0)
//!     .unwrap();
//! log.add_record("Peter", time).unwrap();
//!
//! let records = log.read_all().unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].to_line(), "Peter;2019-04-09T13:00:00");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod log;
mod record;
mod segment;

pub use config::{Config, DEFAULT_MAX_ENTRIES_PER_FILE};
pub use error::{AuditError, AuditResult};
pub use log::{AuditLog, LogStats};
pub use record::{VisitorRecord, LINE_SEPARATOR, RECORD_DELIMITER, TIMESTAMP_FORMAT};
pub use segment::{
    discover_segments, parse_segment_index, segment_file_name, segment_path, Segment,
    FIRST_SEGMENT_INDEX, SEGMENT_EXTENSION, SEGMENT_PREFIX,
};

/// Version of the visitlog crates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
