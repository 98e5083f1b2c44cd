//! Hand-off to an interactive editor.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::{ConfigError, Result};

/// Editors tried, in order, when neither `$VISUAL` nor `$EDITOR` is set.
pub const FALLBACK_EDITORS: &[&str] = &["vi", "vim", "nano"];

/// Opens a file for interactive editing and waits for it to close.
pub trait Editor: Send + Sync {
    /// # Errors
    ///
    /// Returns `NoEditor` if nothing can be launched, `Editor` if the
    /// editor exits unsuccessfully, or `Io` if it cannot be spawned.
    fn open(&self, path: &Path) -> Result<()>;
}

/// Editor picked from `$VISUAL`, `$EDITOR`, then [`FALLBACK_EDITORS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEditor;

impl SystemEditor {
    /// Resolve the editor command line (program plus arguments).
    #[must_use]
    pub fn resolve() -> Option<Vec<String>> {
        resolve_from(
            std::env::var_os("VISUAL"),
            std::env::var_os("EDITOR"),
            |name| which::which(name).is_ok(),
        )
    }
}

impl Editor for SystemEditor {
    fn open(&self, path: &Path) -> Result<()> {
        let argv = Self::resolve().ok_or(ConfigError::NoEditor)?;
        let (program, args) = argv.split_first().ok_or(ConfigError::NoEditor)?;

        tracing::debug!("Opening {} with {program}", path.display());
        let status = Command::new(program)
            .args(args)
            .arg(path)
            .status()
            .map_err(|e| ConfigError::io(path, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(ConfigError::Editor {
                editor: program.clone(),
                status,
            })
        }
    }
}

fn resolve_from(
    visual: Option<OsString>,
    editor: Option<OsString>,
    on_path: impl Fn(&str) -> bool,
) -> Option<Vec<String>> {
    for var in [visual, editor].into_iter().flatten() {
        let value = var.to_string_lossy();
        match shell_words::split(&value) {
            Ok(argv) if !argv.is_empty() => return Some(argv),
            Ok(_) => {}
            Err(e) => tracing::warn!("Ignoring unparseable editor {value:?}: {e}"),
        }
    }
    FALLBACK_EDITORS
        .iter()
        .copied()
        .find(|&name| on_path(name))
        .map(|name| vec![name.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_wins_over_editor() {
        let argv = resolve_from(Some("code --wait".into()), Some("nano".into()), |_| true);
        assert_eq!(argv.unwrap(), ["code", "--wait"]);
    }

    #[test]
    fn test_editor_used_when_visual_blank() {
        let argv = resolve_from(Some("  ".into()), Some("emacs -nw".into()), |_| false);
        assert_eq!(argv.unwrap(), ["emacs", "-nw"]);
    }

    #[test]
    fn test_fallback_order() {
        let argv = resolve_from(None, None, |name| name != "vi");
        assert_eq!(argv.unwrap(), ["vim"]);
        assert!(resolve_from(None, None, |_| false).is_none());
    }

    #[test]
    fn test_quoted_program_path() {
        let argv = resolve_from(None, Some("'/opt/My Editor/bin/ed' -x".into()), |_| false);
        assert_eq!(argv.unwrap(), ["/opt/My Editor/bin/ed", "-x"]);
    }
}
