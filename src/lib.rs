//! `yconf` - command-line front end for `yconf-lib`.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Resolving the store from flags and environment
//! - [`error`] - Error types for command handlers
//! - [`logging`] - tracing subscriber setup
//! - [`prompt`] - Interactive confirmation
//!
//! The store itself lives in `yconf-lib` so other tools can embed it.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;

pub use error::{CliError, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
