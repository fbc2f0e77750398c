//! `labid material-ids` command.

use crate::allocate::Allocator;
use crate::context::ServiceContext;
use crate::ids::{generate_material_ids, Period};

/// Execute the `material-ids` command.
///
/// `period` is `(year, month)` text; the clock's month is used when absent.
/// With `last` the remote counter is not consulted.
///
/// # Errors
///
/// Returns an error string for invalid input or an unavailable counter.
pub async fn run(
    ctx: &ServiceContext,
    count: usize,
    period: Option<(&str, &str)>,
    last: Option<u64>,
) -> Result<String, String> {
    let period = match period {
        Some((year, month)) => Period::parse(year, month).map_err(|e| e.to_string())?,
        None => Period::of(ctx.clock.now()),
    };

    let ids = match last {
        Some(last) => generate_material_ids(&ctx.format, count, last, period),
        None => Allocator::new(ctx).material_ids_in(count, period).await,
    }
    .map_err(|e| e.to_string())?;

    Ok(ids.join("\n"))
}
