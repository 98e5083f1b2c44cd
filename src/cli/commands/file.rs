//! File and dir command implementations.

use std::path::Path;

use crate::config::CliOverrides;

/// Print the resolved configuration file path, or an empty line if it
/// cannot be determined.
pub fn execute(overrides: &CliOverrides) {
    let handle = overrides.handle();
    print_path(handle.file().as_deref(), handle.id());
}

/// Print the resolved configuration directory, or an empty line if it
/// cannot be determined.
pub fn execute_dir(overrides: &CliOverrides) {
    let handle = overrides.handle();
    print_path(handle.dir().as_deref(), handle.id());
}

fn print_path(path: Option<&Path>, id: &str) {
    match path {
        Some(path) => println!("{}", path.display()),
        None => {
            tracing::warn!("Unable to resolve config for {id:?}");
            println!();
        }
    }
}
