//! Command dispatch and handlers.
//!
//! Handlers return the text to print; `crate::run` writes it to stdout.

pub mod material_ids;
pub mod report;
pub mod role;
pub mod test_id;
pub mod ulr;

use std::future::Future;

use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::cli::{Command, ReportAction};
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// With `LABID_REPLAY` set, every port is served from that cassette. With
/// `LABID_RECORD` set, port interactions are recorded into a new cassette
/// in that directory, which is written even when the command fails.
///
/// # Errors
///
/// Returns an error string if context setup or the command handler fails.
pub fn dispatch(command: &Command, config: &Config) -> Result<String, String> {
    if let Some(path) = &config.replay_cassette {
        info!(cassette = %path.display(), "replaying");
        let ctx = ServiceContext::replaying(path, config.format.clone())?;
        return dispatch_with_context(command, &ctx);
    }

    if let Some(dir) = &config.record_dir {
        let session = RecordingSession::start(dir).map_err(|e| e.to_string())?;
        let ctx = ServiceContext::recording(config, &session)?;
        let result = dispatch_with_context(command, &ctx);

        // Adapters hold recorder handles; release them before finishing.
        drop(ctx);
        let path = session.finish().map_err(|e| e.to_string())?;
        eprintln!("Recording saved to: {}", path.display());
        return result;
    }

    let ctx = ServiceContext::live(config)?;
    dispatch_with_context(command, &ctx)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<String, String> {
    match command {
        Command::TestId { count, at } => test_id::run(ctx, *count, at.as_deref()),
        Command::MaterialIds { count, year, month, last } => block_on(material_ids::run(
            ctx,
            *count,
            year.as_deref().zip(month.as_deref()),
            *last,
        ))?,
        Command::FormatTests { file, count } => block_on(format_tests::run(ctx, file, *count))?,
        Command::Ulr { created_at, year } => ulr::run(ctx, created_at.as_deref(), *year),
        Command::Role { code } => role::run(*code),
        Command::Report { action } => match action {
            ReportAction::Regions { file } => report::regions(ctx, file),
            ReportAction::Set { file, region, text, out } => {
                report::set(ctx, file, *region, text, out.as_deref())
            }
        },
    }
}

/// Drive a handler future on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    Ok(runtime.block_on(future))
}

#[cfg(test)]
pub(crate) mod testing;
