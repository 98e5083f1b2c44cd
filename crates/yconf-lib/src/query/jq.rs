//! External `jq` backend.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;

use super::{Evaluator, OutputFormat, render, yaml_to_json};
use crate::error::{ConfigError, Result};

/// Converts the document to JSON and runs `jq` on it.
#[derive(Debug, Clone)]
pub struct JqEvaluator {
    program: PathBuf,
}

impl JqEvaluator {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Find `jq` on `PATH`.
    #[must_use]
    pub fn locate() -> Option<Self> {
        which::which("jq").ok().map(Self::new)
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn run(&self, json: &[u8], args: &[&str], selector: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(args)
            .arg(selector)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ConfigError::evaluation(selector, format!("failed to run jq: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(json)
                .map_err(|e| ConfigError::evaluation(selector, format!("failed to feed jq: {e}")))?;
        }
        let output = child
            .wait_with_output()
            .map_err(|e| ConfigError::evaluation(selector, format!("jq did not finish: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!("jq stderr: {}", stderr.trim());
            return Err(ConfigError::evaluation(selector, stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Evaluator for JqEvaluator {
    fn evaluate(&self, document: &str, selector: &str, format: OutputFormat) -> Result<String> {
        let value = yaml_to_json(document, selector)?;
        let json = serde_json::to_vec(&value)
            .map_err(|e| ConfigError::evaluation(selector, e.to_string()))?;

        // One compact JSON value per line, rendered like the native engine.
        let stdout = self.run(&json, &["-c"], selector)?;
        let mut results = Vec::new();
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            let result: Value = serde_json::from_str(line)
                .map_err(|e| ConfigError::evaluation(selector, e.to_string()))?;
            results.push(result);
        }
        render(&results, format, selector)
    }
}
