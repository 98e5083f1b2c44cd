//! Edit command implementation.

use crate::config::CliOverrides;
use crate::error::Result;

/// Open the configuration file in the user's editor and wait for it.
///
/// # Errors
///
/// Returns an error if the path is unresolved, no editor is available, or
/// the editor fails.
pub fn execute(overrides: &CliOverrides) -> Result<()> {
    overrides.store()?.edit()?;
    Ok(())
}
