use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// Scratch base directory for one test; every run targets id `app` in it.
pub struct YconfWorkspace {
    _temp: TempDir,
    pub root: PathBuf,
}

impl YconfWorkspace {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn base_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    pub fn config_file(&self) -> PathBuf {
        self.base_dir().join("app").join("config.yaml")
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("yconf").expect("yconf binary");
        cmd.current_dir(&self.root)
            .env("YCONF_DIR", self.base_dir())
            .env("YCONF_ID", "app")
            .env_remove("YCONF_FILE")
            .env_remove("YCONF_FORMAT")
            .env_remove("RUST_LOG");
        cmd
    }
}

pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

pub fn finish(cmd: &mut Command, label: &str) -> CmdOutput {
    let output = cmd.output().expect(label);
    CmdOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

pub fn run_yconf<I, S>(workspace: &YconfWorkspace, args: I, label: &str) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    finish(workspace.command().args(args), label)
}

pub fn run_yconf_stdin<I, S>(
    workspace: &YconfWorkspace,
    args: I,
    stdin: &str,
    label: &str,
) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    finish(workspace.command().args(args).write_stdin(stdin), label)
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}
