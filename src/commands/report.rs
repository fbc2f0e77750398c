//! `labid report` commands.

use std::fmt::Write;
use std::path::Path;

use crate::context::ServiceContext;
use crate::report::{FileSink, ReportDocument};

/// List the editable regions of a report, one per line: index, tag, text.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or parsed.
pub fn regions(ctx: &ServiceContext, file: &Path) -> Result<String, String> {
    let doc = load(ctx, file)?;
    let regions = doc.regions();
    if regions.is_empty() {
        return Ok("No editable regions.".to_string());
    }

    let mut out = String::new();
    for region in regions {
        let _ = writeln!(out, "{}\t{}\t{}", region.index, region.tag, region.text.replace('\n', "\\n"));
    }
    out.pop();
    Ok(out)
}

/// Replace one region's text and save the report.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or parsed, the region
/// does not exist, or the result cannot be written.
pub fn set(
    ctx: &ServiceContext,
    file: &Path,
    region: usize,
    text: &str,
    out: Option<&Path>,
) -> Result<String, String> {
    let mut doc = load(ctx, file)?;
    doc.set_editing(true);
    doc.replace_text(region, text).map_err(|e| e.to_string())?;

    let target = out.unwrap_or(file);
    doc.save(&FileSink::new(ctx.fs.as_ref(), target)).map_err(|e| e.to_string())?;
    Ok(format!("Saved {}", target.display()))
}

fn load(ctx: &ServiceContext, file: &Path) -> Result<ReportDocument, String> {
    let markup = ctx
        .fs
        .read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
    ReportDocument::parse(&markup).map_err(|e| format!("Failed to parse {}: {e}", file.display()))
}
