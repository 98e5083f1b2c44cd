//! Init command implementation.

use crate::cli::InitArgs;
use crate::config::CliOverrides;
use crate::error::{CliError, Result};
use crate::prompt;

/// Execute the init command.
///
/// Asks for confirmation first when attached to a terminal, unless `--yes`.
///
/// # Errors
///
/// Returns an error if the path is unresolved or the store cannot be reset.
pub fn execute(args: &InitArgs, overrides: &CliOverrides) -> Result<()> {
    let store = overrides.store()?;
    let dir = store.dir().ok_or_else(|| CliError::Unresolved {
        id: store.id().to_string(),
    })?;

    if !args.yes && prompt::is_interactive() {
        let question = format!("Really initialize {}? (y/N) ", dir.display());
        if !prompt::confirm(&question)? {
            tracing::debug!("Init of {} declined", dir.display());
            return Ok(());
        }
    }

    store.init()?;
    Ok(())
}
