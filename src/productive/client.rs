use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::{ProductiveApi, install_crypto_provider};
use super::error::{ApiError, ApiResult};
use super::query::QueryParams;
use crate::config::Config;

const JSON_API: &str = "application/vnd.api+json";

/// HTTP client for the Productive REST API.
///
/// Authentication headers and the request timeout are baked into the
/// underlying `reqwest::Client`, whose connection pool is shared by every
/// tool invocation.
#[derive(Clone)]
pub struct ProductiveClient {
    base_url: String,
    client: Client,
}

impl ProductiveClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        install_crypto_provider();

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-auth-token"),
            header_value(&config.api_token, "PRODUCTIVE_API_KEY")?,
        );
        headers.insert(
            HeaderName::from_static("x-organization-id"),
            header_value(&config.organization_id.to_string(), "PRODUCTIVE_ORGANIZATION")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("productive-mcp/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Translate a response into a JSON tree or a classified error.
    pub async fn handle_response(response: Response) -> ApiResult<Value> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            return serde_json::from_str(&text).map_err(|e| ApiError::Upstream {
                status: status.as_u16(),
                message: format!("invalid JSON in response body: {e}"),
                code: None,
            });
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ApiError::not_found(response.url().path().to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimited),
            _ => {
                let text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(upstream_error(status, &text))
            }
        }
    }
}

impl ProductiveApi for ProductiveClient {
    async fn get(&self, path: &str, query: &QueryParams) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, params = ?query.pairs(), "GET");

        let response = self.client.get(&url).query(&query.pairs()).send().await?;
        Self::handle_response(response).await
    }
}

fn header_value(value: &str, variable: &str) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        ApiError::validation(format!(
            "{variable} contains characters not allowed in an HTTP header"
        ))
    })
}

/// Build an `Upstream` error, preferring the message the API put in the body.
///
/// Understands both `{"message", "errorCode"}` bodies and JSON:API
/// `{"errors": [{"detail", "title", "code"}]}` bodies; anything else is
/// reported as raw text.
fn upstream_error(status: StatusCode, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<Value>(body).ok();

    let from_message = parsed.as_ref().and_then(|json| {
        let message = json.get("message")?.as_str()?.to_string();
        let code = json
            .get("errorCode")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some((message, code))
    });

    let from_errors = || {
        let first = parsed.as_ref()?.get("errors")?.as_array()?.first()?;
        let message = first
            .get("detail")
            .or_else(|| first.get("title"))?
            .as_str()?
            .to_string();
        let code = match first.get("code") {
            Some(Value::String(code)) => Some(code.clone()),
            Some(Value::Number(code)) => Some(code.to_string()),
            _ => None,
        };
        Some((message, code))
    };

    let (message, code) = from_message
        .or_else(from_errors)
        .unwrap_or_else(|| (format!("HTTP {}: {}", status.as_u16(), body), None));

    ApiError::Upstream {
        status: status.as_u16(),
        message,
        code,
    }
}
