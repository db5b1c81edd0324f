//! Audit log configuration.

/// Default number of records a segment file may hold.
pub const DEFAULT_MAX_ENTRIES_PER_FILE: usize = 1000;

/// Configuration for an audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of records a segment file may hold before the log
    /// rotates to a new file. Must be at least 1.
    pub max_entries_per_file: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries_per_file: DEFAULT_MAX_ENTRIES_PER_FILE,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-segment record capacity.
    #[must_use]
    pub const fn max_entries_per_file(mut self, value: usize) -> Self {
        self.max_entries_per_file = value;
        self
    }
}
