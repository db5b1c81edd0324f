//! # visitlog Storage
//!
//! Storage gateway trait and implementations for visitlog.
//!
//! This crate provides the lowest-level storage abstraction for the audit
//! log. Gateways are **opaque path-and-text stores** - they do not interpret
//! the data they hold.
//!
//! ## Design Principles
//!
//! - Gateways expose three primitives: list a directory, read a file's lines,
//!   overwrite a file's text
//! - No knowledge of segment naming, record format, or rotation policy
//! - Must be `Send + Sync` for shared access
//! - The audit log core owns all file format interpretation
//!
//! ## Available Gateways
//!
//! - [`InMemoryGateway`] - For testing and ephemeral logs
//! - [`FsGateway`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//! use visitlog_storage::{InMemoryGateway, StorageGateway};
//!
//! let mut gateway = InMemoryGateway::new();
//! let path = Path::new("audits/audit_1.txt");
//! gateway.write_all_text(path, "Peter;2019-04-09T13:00:00").unwrap();
//! assert_eq!(gateway.read_lines(path).unwrap().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod fs;
mod gateway;
mod memory;

pub use error::{StorageError, StorageResult};
pub use fs::FsGateway;
pub use gateway::StorageGateway;
pub use memory::InMemoryGateway;
