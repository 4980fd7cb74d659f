//! Agent-facing output encodings.
//!
//! Sanitized responses are rendered as pretty JSON, YAML, or TOON (a compact,
//! indentation-based notation that prints uniform lists of records as tables).

mod toon;


use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

pub use toon::to_toon;

#[derive(Error, Diagnostic, Debug)]
pub enum FormatError {
    #[error("Failed to encode response as JSON: {0}")]
    #[diagnostic(code(productive_mcp::format::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode response as YAML: {0}")]
    #[diagnostic(code(productive_mcp::format::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

/// Output encoding selected by `OUTPUT_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    Yaml,
    #[default]
    Toon,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "toon" => Ok(OutputFormat::Toon),
            other => Err(format!(
                "OUTPUT_FORMAT must be one of 'toon', 'json' or 'yaml' (got '{other}')"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Toon => "toon",
        };
        f.write_str(name)
    }
}

impl OutputFormat {
    /// Render a value in this format.
    pub fn render(self, value: &Value) -> Result<String, FormatError> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Toon => Ok(to_toon(value)),
        }
    }
}
