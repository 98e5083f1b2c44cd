//! Error types for `yconf` command handlers.

use thiserror::Error;
use yconf_lib::ConfigError;

/// Errors surfaced at the command-line boundary.
#[derive(Error, Debug)]
pub enum CliError {
    /// The store path could not be determined for this id.
    #[error("unable to resolve config for {id:?}")]
    Unresolved { id: String },

    /// `--jq` was requested but no `jq` binary is on PATH.
    #[error("jq not found on PATH")]
    JqNotFound,

    /// Store operation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal or input I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type using `CliError`.
pub type Result<T> = std::result::Result<T, CliError>;
