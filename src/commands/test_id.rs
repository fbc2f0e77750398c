//! `labid test-id` command.

use crate::allocate::Allocator;
use crate::context::ServiceContext;

/// Execute the `test-id` command.
///
/// Uses `at` as the registration time when given, otherwise the clock port.
///
/// # Errors
///
/// Returns an error string for a malformed `at` or an overflowing count.
pub fn run(ctx: &ServiceContext, count: u64, at: Option<&str>) -> Result<String, String> {
    let allocator = Allocator::new(ctx);
    let id = match at {
        Some(at) => allocator.test_id_at(count, at),
        None => allocator.next_test_id(count),
    };
    id.map_err(|e| e.to_string())
}
