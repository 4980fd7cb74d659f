use miette::Diagnostic;
use thiserror::Error;

/// Failures surfaced by the Productive API client.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Unauthorized: invalid API token")]
    #[diagnostic(
        code(productive_mcp::api::unauthorized),
        help("Check PRODUCTIVE_API_KEY and PRODUCTIVE_ORGANIZATION.")
    )]
    Unauthorized,

    #[error("Resource not found: {message}")]
    #[diagnostic(code(productive_mcp::api::not_found))]
    NotFound { message: String },

    #[error("Rate limit exceeded")]
    #[diagnostic(
        code(productive_mcp::api::rate_limited),
        help("The Productive API is throttling requests; wait before retrying.")
    )]
    RateLimited,

    #[error("Productive API error ({status}): {message}")]
    #[diagnostic(code(productive_mcp::api::upstream))]
    Upstream {
        status: u16,
        message: String,
        code: Option<String>,
    },

    #[error("Request failed: {source}")]
    #[diagnostic(
        code(productive_mcp::api::transport),
        help("Is PRODUCTIVE_BASE_URL reachable? Slow responses may need a larger PRODUCTIVE_TIMEOUT.")
    )]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid request: {message}")]
    #[diagnostic(code(productive_mcp::api::validation))]
    Validation { message: String },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    /// HTTP status associated with this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound { .. } => Some(404),
            ApiError::RateLimited => Some(429),
            ApiError::Upstream { status, .. } => Some(*status),
            ApiError::Transport { .. } | ApiError::Validation { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport { source: e }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
