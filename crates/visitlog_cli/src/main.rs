//! visitlog CLI
//!
//! Command-line tools for the visitlog audit log.
//!
//! # Commands
//!
//! - `add` - Record a visitor entry
//! - `dump` - Print recorded visits
//! - `inspect` - Display audit log statistics
//! - `verify` - Check audit directory integrity
//! - `version` - Show version information

mod commands;
mod lock;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use visitlog_core::DEFAULT_MAX_ENTRIES_PER_FILE;

/// visitlog command-line audit log tools.
#[derive(Parser)]
#[command(name = "visitlog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the audit log directory
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a visitor entry
    Add {
        /// Visitor name
        name: String,

        /// Time of the visit, like 2019-04-09T13:00:00 (defaults to now)
        #[arg(short, long)]
        time: Option<String>,

        /// Per-segment record capacity
        #[arg(short, long, default_value_t = DEFAULT_MAX_ENTRIES_PER_FILE)]
        max_entries: usize,
    },

    /// Print recorded visits, oldest first
    Dump {
        /// Maximum number of records to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display audit log statistics
    Inspect {
        /// Show per-segment details
        #[arg(short, long)]
        segments: bool,

        /// Per-segment record capacity
        #[arg(short, long, default_value_t = DEFAULT_MAX_ENTRIES_PER_FILE)]
        max_entries: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check audit directory integrity
    Verify {
        /// Per-segment record capacity
        #[arg(short, long, default_value_t = DEFAULT_MAX_ENTRIES_PER_FILE)]
        max_entries: usize,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Add {
            name,
            time,
            max_entries,
        } => {
            let path = cli.path.ok_or("Audit directory path required for add")?;
            commands::add::run(&path, &name, time.as_deref(), max_entries)?;
        }
        Commands::Dump { limit, format } => {
            let path = cli.path.ok_or("Audit directory path required for dump")?;
            commands::dump::run(&path, limit, &format)?;
        }
        Commands::Inspect {
            segments,
            max_entries,
            format,
        } => {
            let path = cli.path.ok_or("Audit directory path required for inspect")?;
            commands::inspect::run(&path, segments, max_entries, &format)?;
        }
        Commands::Verify { max_entries } => {
            let path = cli.path.ok_or("Audit directory path required for verify")?;
            commands::verify::run(&path, max_entries)?;
        }
        Commands::Version => {
            println!("visitlog CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("visitlog Core v{}", visitlog_core::VERSION);
        }
    }

    Ok(())
}
