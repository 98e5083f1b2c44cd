//! `yconf` - per-application YAML configuration store.
//!
//! Reads, overwrites, queries, and hands off for editing a single
//! `config.yaml` under the user's configuration directory.

use yconf::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
