//! `labid role` command.

use crate::access::Role;

/// Execute the `role` command.
///
/// # Errors
///
/// Returns an error string for an unknown role code.
pub fn run(code: u8) -> Result<String, String> {
    let role = Role::from_code(code).map_err(|e| e.to_string())?;
    Ok(format!("{}\t{}", role.label(), role.dashboard()))
}
