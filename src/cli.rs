//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `labid`.
#[derive(Debug, Parser)]
#[command(name = "labid", version, about = "Generate lab test identifiers and edit reports")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the next test ID.
    TestId {
        /// Number of tests already registered.
        #[arg(long, default_value_t = 0)]
        count: u64,
        /// Registration time (RFC 3339); defaults to now.
        #[arg(long)]
        at: Option<String>,
    },
    /// Print ATL IDs for a batch of materials.
    MaterialIds {
        /// Number of distinct materials.
        #[arg(long)]
        count: usize,
        /// Year (two or four digits); defaults to the current year.
        #[arg(long, requires = "month")]
        year: Option<String>,
        /// Month; defaults to the current month.
        #[arg(long, requires = "year")]
        month: Option<String>,
        /// Last allocated number; skips the remote counter when given.
        #[arg(long)]
        last: Option<u64>,
    },
    /// Stamp a JSON array of test records with test and ATL IDs.
    FormatTests {
        /// Path to the JSON file.
        file: PathBuf,
        /// Number of tests already registered.
        #[arg(long, default_value_t = 0)]
        count: u64,
    },
    /// Print a unique lab report number.
    Ulr {
        /// Report creation time (RFC 3339); defaults to now.
        #[arg(long)]
        created_at: Option<String>,
        /// Year for the ULR; defaults to the creation year.
        #[arg(long)]
        year: Option<i32>,
    },
    /// Show the label and dashboard for a role code.
    Role {
        /// Role code as sent by the API.
        code: u8,
    },
    /// Inspect or edit report tables.
    Report {
        /// Report action.
        #[command(subcommand)]
        action: ReportAction,
    },
}

/// `labid report` actions.
#[derive(Debug, Subcommand)]
pub enum ReportAction {
    /// List the editable regions of a report.
    Regions {
        /// Report markup file.
        file: PathBuf,
    },
    /// Replace the text of one region and save.
    Set {
        /// Report markup file.
        file: PathBuf,
        /// Region index from `report regions`.
        #[arg(long)]
        region: usize,
        /// New text.
        #[arg(long)]
        text: String,
        /// Output file; defaults to overwriting the input.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
