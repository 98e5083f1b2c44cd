//! Query evaluation over the stored document.
//!
//! The store hands raw YAML text and a selector to an [`Evaluator`] and gets
//! formatted text back. Two backends exist:
//!
//! - [`NativeEvaluator`] - embedded selector engine (default)
//! - [`JqEvaluator`] - pipes the document through an external `jq`

mod jq;
mod selector;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{ConfigError, Result};

pub use jq::JqEvaluator;
pub use selector::Selector;

/// Output encoding for query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Evaluates a selector against a YAML document.
pub trait Evaluator: Send + Sync {
    /// Return the formatted, trimmed result of `selector` on `document`.
    ///
    /// An empty string means no match.
    ///
    /// # Errors
    ///
    /// Returns `Evaluation` if the document cannot be parsed, the selector is
    /// malformed, or evaluation fails.
    fn evaluate(&self, document: &str, selector: &str, format: OutputFormat) -> Result<String>;
}

/// Embedded selector engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEvaluator;

impl Evaluator for NativeEvaluator {
    fn evaluate(&self, document: &str, selector: &str, format: OutputFormat) -> Result<String> {
        let parsed = Selector::parse(selector).map_err(|e| ConfigError::evaluation(selector, e))?;
        let value = yaml_to_json(document, selector)?;
        let results = parsed
            .apply(value)
            .map_err(|e| ConfigError::evaluation(selector, e))?;
        render(&results, format, selector)
    }
}

/// Format results one per line. `null` results print nothing, so a missing
/// key and an explicit null both yield empty output.
pub(crate) fn render(results: &[Value], format: OutputFormat, selector: &str) -> Result<String> {
    let mut out = Vec::with_capacity(results.len());
    for result in results.iter().filter(|v| !v.is_null()) {
        out.push(format_value(result, format).map_err(|e| ConfigError::evaluation(selector, e))?);
    }
    Ok(out.join("\n").trim().to_string())
}

/// Parse YAML text into the JSON value model.
pub(crate) fn yaml_to_json(document: &str, selector: &str) -> Result<Value> {
    serde_yaml::from_str(document)
        .map_err(|e| ConfigError::evaluation(selector, format!("invalid document: {e}")))
}

/// Format one result. Strings are printed raw, like `jq -r`.
fn format_value(value: &Value, format: OutputFormat) -> std::result::Result<String, String> {
    if let Value::String(s) = value {
        return Ok(s.clone());
    }
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
    }
}
