//! Data command implementation.

use crate::config::CliOverrides;
use crate::error::Result;

/// Print the raw configuration. Missing or empty config prints an empty line.
///
/// # Errors
///
/// Returns an error only if the store cannot be built.
pub fn execute(overrides: &CliOverrides) -> Result<()> {
    let data = overrides.store()?.data();
    if data.ends_with('\n') {
        print!("{data}");
    } else {
        println!("{data}");
    }
    Ok(())
}
