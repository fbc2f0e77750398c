//! `labid ulr` command.

use crate::allocate::Allocator;
use crate::context::ServiceContext;

/// Execute the `ulr` command.
///
/// # Errors
///
/// Returns an error string for a malformed `created_at`.
pub fn run(ctx: &ServiceContext, created_at: Option<&str>, year: Option<i32>) -> Result<String, String> {
    Allocator::new(ctx).ulr(created_at, year).map_err(|e| e.to_string())
}
