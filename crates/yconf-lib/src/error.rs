//! Error types for `yconf-lib`.
//!
//! Writes fail loud, reads fail quiet: every variant here can be returned
//! from `init`, `overwrite`, or `edit`, while read and query paths log the
//! error and degrade to empty output.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Primary error type for configuration store operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    // === Resolution Errors ===
    /// The configuration path cannot be determined.
    #[error("unable to resolve config path for {id:?}")]
    Unresolved { id: String },

    // === I/O Errors ===
    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another writer holds the lock (non-blocking acquisition only).
    #[error("config lock is held by another writer: {}", path.display())]
    LockContended { path: PathBuf },

    // === Encoding Errors ===
    /// The value could not be encoded to (or decoded from) YAML.
    #[error("YAML error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    // === Query Errors ===
    /// The selector is malformed or evaluation failed.
    ///
    /// Never returned from the store itself; it is logged and the query
    /// yields an empty string.
    #[error("query {selector:?} failed: {reason}")]
    Evaluation { selector: String, reason: String },

    // === Editor Errors ===
    /// Neither `$VISUAL`, `$EDITOR`, nor a fallback editor is available.
    #[error("no editor found (set $VISUAL or $EDITOR)")]
    NoEditor,

    /// The editor process exited unsuccessfully.
    #[error("editor {editor:?} exited with {status}")]
    Editor { editor: String, status: ExitStatus },
}

impl ConfigError {
    /// Wrap an I/O error with the path it happened on.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn evaluation(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Evaluation {
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using `ConfigError`.
pub type Result<T> = std::result::Result<T, ConfigError>;
