//! Core library entry for the `labid` CLI.
//!
//! Identifier generation lives in [`ids`]; [`allocate`] wires it to the
//! clock and remote counter ports. [`access`] and [`report`] cover role
//! gating and inline report-table editing.

pub mod access;
pub mod adapters;
pub mod allocate;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod ids;
pub mod ports;
pub mod report;

use clap::Parser;

/// Run the CLI with the provided arguments, printing the command output.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    let config = config::Config::load();
    let output = commands::dispatch(&cli.command, &config)?;
    println!("{output}");
    Ok(())
}
