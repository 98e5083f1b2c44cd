//! Cross-process advisory write lock.
//!
//! The lock lives on a sidecar file next to the config file rather than on
//! the config file itself, because the config file is replaced by rename on
//! every write and a lock on the old inode would no longer exclude anyone.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{ConfigError, Result};

/// Exclusive lock guard. Released when dropped.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until the exclusive lock on `path` is acquired.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the lock file cannot be opened or locked.
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = open_lock_file(path)?;
        file.lock_exclusive()
            .map_err(|e| ConfigError::io(path, e))?;
        tracing::trace!("Acquired lock {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Acquire the lock without waiting.
    ///
    /// # Errors
    ///
    /// Returns `LockContended` if another holder has it, or `Io` if the lock
    /// file cannot be opened.
    pub fn try_acquire(path: &Path) -> Result<Self> {
        let file = open_lock_file(path)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                file,
                path: path.to_path_buf(),
            }),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(ConfigError::LockContended {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => Err(ConfigError::io(path, e)),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("Failed to release lock {}: {e}", self.path.display());
        } else {
            tracing::trace!("Released lock {}", self.path.display());
        }
    }
}

fn open_lock_file(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(crate::persist::FILE_MODE);
    }
    options.open(path).map_err(|e| ConfigError::io(path, e))
}
