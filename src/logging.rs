//! Logging initialization for `yconf`.
//!
//! Diagnostics always go to stderr so stdout stays clean for `data`,
//! `file`, and `query` output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `-q` shows errors only, the default
/// shows warnings (including swallowed query failures), `-v` adds debug
/// and `-vv` trace.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool, json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose >= 2)
                    .without_time(),
            )
            .try_init()
    }
}

fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}
