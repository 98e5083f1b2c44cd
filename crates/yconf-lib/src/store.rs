//! Store façade binding a handle to persistence, query, and editing.
//!
//! Holds no mutable state: every call re-reads or rewrites the file.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::editor::{Editor, SystemEditor};
use crate::error::{ConfigError, Result};
use crate::handle::ConfigHandle;
use crate::persist;
use crate::query::{Evaluator, NativeEvaluator, OutputFormat};

/// One application's configuration store.
pub struct ConfigStore {
    handle: ConfigHandle,
    evaluator: Box<dyn Evaluator>,
    editor: Box<dyn Editor>,
    format: OutputFormat,
}

impl ConfigStore {
    /// Create a store with the embedded query engine, the system editor,
    /// and JSON query output.
    #[must_use]
    pub fn new(handle: ConfigHandle) -> Self {
        Self {
            handle,
            evaluator: Box::new(NativeEvaluator),
            editor: Box::new(SystemEditor),
            format: OutputFormat::default(),
        }
    }

    #[must_use]
    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    #[must_use]
    pub fn with_editor(mut self, editor: impl Editor + 'static) -> Self {
        self.editor = Box::new(editor);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub const fn handle(&self) -> &ConfigHandle {
        &self.handle
    }

    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Destructively reset the store to an empty config file.
    ///
    /// There is no confirmation here; callers that want one must ask first.
    ///
    /// # Errors
    ///
    /// See [`persist::initialize`].
    pub fn init(&self) -> Result<()> {
        persist::initialize(&self.handle)
    }

    /// Resolved config file path, `None` if unresolved.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        self.handle.file()
    }

    /// Resolved store directory, `None` if unresolved.
    #[must_use]
    pub fn dir(&self) -> Option<PathBuf> {
        self.handle.dir()
    }

    // ========================================================================
    // Reads (never fail)
    // ========================================================================

    /// Raw file content; empty when missing or unreadable.
    #[must_use]
    pub fn data(&self) -> String {
        persist::read_raw(&self.handle)
    }

    /// Print [`data`](Self::data) plus a newline to stdout.
    pub fn print(&self) {
        println!("{}", self.data());
    }

    /// Write [`data`](Self::data) plus a newline to `out`.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn print_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", self.data())
    }

    /// Evaluate `selector` against the stored document.
    ///
    /// Returns an empty string for a missing or empty document, no match,
    /// or any evaluation failure (logged).
    #[must_use]
    pub fn query(&self, selector: &str) -> String {
        let data = self.data();
        if data.is_empty() {
            return String::new();
        }
        match self.evaluator.evaluate(&data, selector, self.format) {
            Ok(out) => out,
            Err(e) => {
                tracing::warn!("{e}");
                String::new()
            }
        }
    }

    /// Print [`query`](Self::query) plus a newline to stdout.
    pub fn query_print(&self, selector: &str) {
        println!("{}", self.query(selector));
    }

    /// Write [`query`](Self::query) plus a newline to `out`.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn query_print_to<W: Write>(&self, mut out: W, selector: &str) -> io::Result<()> {
        writeln!(out, "{}", self.query(selector))
    }

    /// Decode the stored document into `T`. `Ok(None)` when there is none.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the document does not decode as `T`.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let data = self.data();
        if data.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_yaml::from_str(&data)?))
    }

    // ========================================================================
    // Writes (fail loud)
    // ========================================================================

    /// Replace the whole document with `value` serialized as YAML.
    ///
    /// # Errors
    ///
    /// See [`persist::overwrite`].
    pub fn overwrite<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        persist::overwrite(&self.handle, value)
    }

    /// Replace the whole document with YAML text, validated first.
    ///
    /// # Errors
    ///
    /// See [`persist::overwrite_raw`].
    pub fn overwrite_raw(&self, text: &str) -> Result<()> {
        persist::overwrite_raw(&self.handle, text)
    }

    /// Make sure the directory exists, then open the file in the editor.
    ///
    /// # Errors
    ///
    /// Returns `Unresolved` if the path cannot be determined, `Io` if the
    /// directory cannot be created, or any error from the editor.
    pub fn edit(&self) -> Result<()> {
        persist::ensure_dir(&self.handle)?;
        let path = self.path().ok_or_else(|| ConfigError::Unresolved {
            id: self.handle.id().to_string(),
        })?;
        self.editor.open(&path)
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("handle", &self.handle)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
