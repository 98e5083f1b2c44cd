//! Store resolution for `yconf`.
//!
//! Turns global flags (and their `YCONF_*` environment fallbacks) into a
//! [`ConfigStore`]. Precedence: flag > environment > default, where the
//! defaults are the executable name, the platform config directory, and
//! `config.yaml`.

use std::path::PathBuf;

use yconf_lib::{ConfigHandle, ConfigStore, Configurer, JqEvaluator, OutputFormat};

use crate::error::{CliError, Result};

/// Store-related overrides collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub id: Option<String>,
    pub dir: Option<String>,
    pub file_name: Option<String>,
    pub format: OutputFormat,
    pub jq: bool,
}

impl CliOverrides {
    /// The handle these overrides describe.
    #[must_use]
    pub fn handle(&self) -> ConfigHandle {
        let mut handle = self
            .id
            .as_ref()
            .map_or_else(ConfigHandle::for_current_exe, ConfigHandle::new);
        if let Some(dir) = &self.dir {
            handle = handle.with_base_dir(PathBuf::from(dir));
        }
        if let Some(name) = &self.file_name {
            handle = handle.with_file_name(name.clone());
        }
        handle
    }

    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        self.format
    }

    /// Build the store, selecting the query backend.
    ///
    /// # Errors
    ///
    /// Returns `JqNotFound` if `--jq` was given and `jq` is not installed.
    pub fn store(&self) -> Result<Box<dyn Configurer>> {
        let store = ConfigStore::new(self.handle()).with_format(self.output_format());
        if self.jq {
            let jq = JqEvaluator::locate().ok_or(CliError::JqNotFound)?;
            tracing::debug!("Using jq at {}", jq.program().display());
            return Ok(Box::new(store.with_evaluator(jq)));
        }
        Ok(Box::new(store))
    }
}
