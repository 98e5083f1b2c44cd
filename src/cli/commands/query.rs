//! Query command implementation.

use crate::cli::QueryArgs;
use crate::config::CliOverrides;
use crate::error::Result;

/// Print the query result followed by a newline.
///
/// Bad selectors and missing config print an empty line; the reason, if
/// any, is logged to stderr.
///
/// # Errors
///
/// Returns an error only if the store cannot be built.
pub fn execute(args: &QueryArgs, overrides: &CliOverrides) -> Result<()> {
    overrides.store()?.query_print(&args.selector);
    Ok(())
}
