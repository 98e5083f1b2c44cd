//! Write command implementation.

use std::fs;
use std::io;

use yconf_lib::ConfigError;

use crate::cli::WriteArgs;
use crate::config::CliOverrides;
use crate::error::Result;

/// Replace the whole configuration with YAML from a file or stdin.
///
/// # Errors
///
/// Returns an error if the input cannot be read, is not valid YAML, or the
/// locked write fails.
pub fn execute(args: &WriteArgs, overrides: &CliOverrides) -> Result<()> {
    let text = match &args.path {
        Some(path) => fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?,
        None => io::read_to_string(io::stdin())?,
    };

    let store = overrides.store()?;
    store.write(&text)?;
    if let Some(path) = store.path() {
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}
