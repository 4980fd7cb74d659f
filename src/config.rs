//! Server configuration.
//!
//! Configuration is read once from the environment at startup and validated
//! eagerly. Every violated constraint is collected so a misconfigured
//! deployment reports all of its problems in one go.

use std::env;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use crate::format::OutputFormat;

pub const DEFAULT_BASE_URL: &str = "https://api.productive.io/api/v2";
pub const DEFAULT_WEBAPP_URL: &str = "https://app.productive.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 50;

/// Largest `page[size]` the Productive API accepts.
pub const MAX_PAGE_SIZE: u32 = 200;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed: {}", .errors.join("; "))]
    #[diagnostic(
        code(productive_mcp::config::invalid),
        help(
            "Set PRODUCTIVE_API_KEY and PRODUCTIVE_ORGANIZATION, and check the optional PRODUCTIVE_* and OUTPUT_FORMAT variables."
        )
    )]
    Invalid { errors: Vec<String> },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub base_url: String,
    pub timeout: Duration,
    pub organization_id: u64,
    pub items_per_page: u32,
    pub output_format: OutputFormat,
    pub webapp_url: String,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Missing optional variables fall back to their defaults; present but
    /// malformed values are reported rather than silently replaced.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string());

        let api_token = read("PRODUCTIVE_API_KEY").unwrap_or_default();
        if api_token.is_empty() {
            errors.push("PRODUCTIVE_API_KEY is required".to_string());
        }

        let base_url = read("PRODUCTIVE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            errors.push("PRODUCTIVE_BASE_URL is required".to_string());
        } else if !is_http_url(&base_url) {
            errors.push("PRODUCTIVE_BASE_URL must be an http(s) URL".to_string());
        }

        let timeout = match read("PRODUCTIVE_TIMEOUT") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    errors.push("PRODUCTIVE_TIMEOUT must be a positive integer".to_string());
                    DEFAULT_TIMEOUT_SECS
                }
            },
        };

        let organization_id = match read("PRODUCTIVE_ORGANIZATION") {
            None => {
                errors.push("PRODUCTIVE_ORGANIZATION is required".to_string());
                0
            }
            Some(raw) if raw.is_empty() => {
                errors.push("PRODUCTIVE_ORGANIZATION is required".to_string());
                0
            }
            Some(raw) => match raw.parse::<u64>() {
                Ok(id) if id > 0 => id,
                _ => {
                    errors.push("PRODUCTIVE_ORGANIZATION must be a positive integer".to_string());
                    0
                }
            },
        };

        let items_per_page = match read("PRODUCTIVE_ITEMS_PER_PAGE") {
            None => DEFAULT_ITEMS_PER_PAGE,
            Some(raw) => match raw.parse::<u32>() {
                Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => size,
                _ => {
                    errors.push(format!(
                        "PRODUCTIVE_ITEMS_PER_PAGE must be between 1 and {MAX_PAGE_SIZE}"
                    ));
                    DEFAULT_ITEMS_PER_PAGE
                }
            },
        };

        let output_format = match read("OUTPUT_FORMAT") {
            None => OutputFormat::default(),
            Some(raw) => raw.parse::<OutputFormat>().unwrap_or_else(|e| {
                errors.push(e);
                OutputFormat::default()
            }),
        };

        let webapp_url =
            read("PRODUCTIVE_WEBAPP_URL").unwrap_or_else(|| DEFAULT_WEBAPP_URL.to_string());
        let webapp_url = webapp_url.trim_end_matches('/').to_string();
        if webapp_url.is_empty() {
            errors.push("PRODUCTIVE_WEBAPP_URL must not be empty".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::Invalid { errors });
        }

        Ok(Self {
            api_token,
            base_url,
            timeout: Duration::from_secs(timeout),
            organization_id,
            items_per_page,
            output_format,
            webapp_url,
        })
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
