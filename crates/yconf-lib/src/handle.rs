//! Configuration handle and path resolution.
//!
//! A handle names one configuration store: `{base_dir}/{id}/{file_name}`.
//! Resolution is pure path arithmetic; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

/// Name of the configuration file within the store directory.
pub const DEFAULT_FILE_NAME: &str = "config.yaml";

/// Identifies one configuration store.
///
/// `id` is used verbatim as a path segment. Callers must not pass values
/// containing `..` or separators; no normalization is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigHandle {
    id: String,
    base_dir: Option<PathBuf>,
    base_overridden: bool,
    file_name: String,
}

impl ConfigHandle {
    /// Create a handle rooted at the platform user-configuration directory.
    ///
    /// If the platform directory cannot be determined the handle is still
    /// created, but [`dir`](Self::dir) and [`file`](Self::file) return `None`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            base_dir: dirs::config_dir(),
            base_overridden: false,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Create a handle named after the running executable.
    #[must_use]
    pub fn for_current_exe() -> Self {
        let id = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_default();
        Self::new(id)
    }

    /// Override the base directory (tests, portable installs).
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self.base_overridden = true;
        self
    }

    /// Override the file name within the store directory.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// True when the base directory was set explicitly rather than taken
    /// from the platform default.
    #[must_use]
    pub const fn base_overridden(&self) -> bool {
        self.base_overridden
    }

    /// The store directory, `base_dir/id`.
    ///
    /// Returns `None` when the base directory is unknown, or when both the
    /// base directory and the id are empty (which would resolve to the
    /// filesystem root or the working directory).
    #[must_use]
    pub fn dir(&self) -> Option<PathBuf> {
        let base = self.base_dir.as_ref()?;
        if base.as_os_str().is_empty() && self.id.is_empty() {
            return None;
        }
        if self.id.is_empty() {
            return Some(base.clone());
        }
        Some(base.join(&self.id))
    }

    /// The configuration file, `base_dir/id/file_name`.
    #[must_use]
    pub fn file(&self) -> Option<PathBuf> {
        self.dir().map(|dir| dir.join(&self.file_name))
    }

    /// The sidecar file used for the cross-process write lock.
    #[must_use]
    pub fn lock_file(&self) -> Option<PathBuf> {
        self.dir()
            .map(|dir| dir.join(format!("{}.lock", self.file_name)))
    }
}
