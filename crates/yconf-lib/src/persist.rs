//! Locked persistence for the configuration file.
//!
//! Writes go through [`write_locked`]: exclusive lock on the sidecar lock
//! file, write to a temp file, fsync, rename over the target. A reader never
//! takes the lock and sees either the old or the new document in full.
//!
//! Directories are created `0700` and files `0600` because config files
//! regularly end up holding tokens.

use std::fs::{self, DirBuilder, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ConfigError, Result};
use crate::handle::ConfigHandle;
use crate::lock::FileLock;

/// Mode for directories created by the store.
pub const DIR_MODE: u32 = 0o700;

/// Mode for files created by the store.
pub const FILE_MODE: u32 = 0o600;

/// Wipe and recreate the store directory with an empty config file.
///
/// Destroys prior content every time. Takes no lock, so it must not run
/// concurrently with any other operation on the same store.
///
/// Stricter than path resolution alone: an empty id is only accepted when
/// the base directory was set explicitly, never on the platform default,
/// where it would wipe the user's whole configuration directory.
///
/// # Errors
///
/// Returns `Unresolved` if the directory cannot be determined (or the id is
/// empty while the base is the platform default), or `Io` if removal or
/// creation fails.
pub fn initialize(handle: &ConfigHandle) -> Result<()> {
    let dir = resolve_dir(handle)?;
    // An empty id on the platform base would resolve to the user's whole
    // config directory.
    if handle.id().is_empty() && !handle.base_overridden() {
        return Err(unresolved(handle));
    }
    let file = dir.join(handle.file_name());

    if dir.exists() {
        fs::remove_dir_all(&dir).map_err(|e| ConfigError::io(&dir, e))?;
        tracing::debug!("Removed {}", dir.display());
    }
    create_dir(&dir)?;
    touch(&file)?;

    tracing::info!("Initialized {}", file.display());
    Ok(())
}

/// Create the store directory if it is missing. Existing content is kept.
///
/// # Errors
///
/// Returns `Unresolved` if the directory cannot be determined, or `Io` if
/// it cannot be created.
pub fn ensure_dir(handle: &ConfigHandle) -> Result<PathBuf> {
    let dir = resolve_dir(handle)?;
    if !dir.exists() {
        create_dir(&dir)?;
        tracing::debug!("Created {}", dir.display());
    }
    Ok(dir)
}

/// Read the config file, logging instead of failing.
///
/// `None` means "no configuration yet": the path is unresolved, the file is
/// missing, or it could not be read (logged at warn).
#[must_use]
pub fn try_read(handle: &ConfigHandle) -> Option<String> {
    let Some(path) = handle.file() else {
        tracing::debug!("Config path for {:?} is unresolved", handle.id());
        return None;
    };
    match fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config at {}", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}", path.display());
            None
        }
    }
}

/// Full file content, or an empty string when there is none.
#[must_use]
pub fn read_raw(handle: &ConfigHandle) -> String {
    try_read(handle).unwrap_or_default()
}

/// Serialize `value` to YAML and replace the config file with it.
///
/// # Errors
///
/// Returns `Serialization` if the value cannot be encoded, `Unresolved` if
/// the path cannot be determined, or `Io` if the directory or the locked
/// write fails.
pub fn overwrite<T: Serialize + ?Sized>(handle: &ConfigHandle, value: &T) -> Result<()> {
    let text = serde_yaml::to_string(value)?;
    write_document(handle, text.as_bytes())
}

/// Replace the config file with already-serialized YAML text.
///
/// The text must parse as YAML; it is written byte for byte.
///
/// # Errors
///
/// Returns `Serialization` if the text is not valid YAML, otherwise as
/// [`overwrite`].
pub fn overwrite_raw(handle: &ConfigHandle, text: &str) -> Result<()> {
    serde_yaml::from_str::<serde_yaml::Value>(text)?;
    write_document(handle, text.as_bytes())
}

/// Atomically replace `path` with `bytes` while holding the lock at
/// `lock_path`.
///
/// Concurrent callers on the same lock path run one after another.
///
/// # Errors
///
/// Returns `Io` if locking, writing, or renaming fails.
pub fn write_locked(path: &Path, lock_path: &Path, bytes: &[u8]) -> Result<()> {
    let _lock = FileLock::acquire(lock_path)?;

    let tmp_path = temp_path(path);
    // A leftover temp file from a crashed writer keeps its old mode when
    // reopened, so start from scratch.
    match fs::remove_file(&tmp_path) {
        Ok(()) => tracing::debug!("Removed stale {}", tmp_path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(ConfigError::io(&tmp_path, e)),
    }
    let mut file = open_private(&tmp_path)?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .and_then(|()| file.sync_all())
        .map_err(|e| ConfigError::io(&tmp_path, e))?;
    drop(file);

    fs::rename(&tmp_path, path).map_err(|e| ConfigError::io(path, e))?;
    tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn write_document(handle: &ConfigHandle, bytes: &[u8]) -> Result<()> {
    let dir = ensure_dir(handle)?;
    let path = dir.join(handle.file_name());
    let lock_path = handle.lock_file().ok_or_else(|| unresolved(handle))?;
    write_locked(&path, &lock_path, bytes)
}

fn resolve_dir(handle: &ConfigHandle) -> Result<PathBuf> {
    handle.dir().ok_or_else(|| unresolved(handle))
}

fn unresolved(handle: &ConfigHandle) -> ConfigError {
    ConfigError::Unresolved {
        id: handle.id().to_string(),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn create_dir(dir: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir).map_err(|e| ConfigError::io(dir, e))
}

fn touch(path: &Path) -> Result<()> {
    open_private(path).map(drop)
}

fn open_private(path: &Path) -> Result<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path).map_err(|e| ConfigError::io(path, e))
}
