//! MCP tool implementations
//!
//! One module per Productive resource. Each module adds a `#[tool_router]`
//! block to [`McpServer`]; the helpers below hold the flow they share:
//! build the query, fetch, sanitize, enrich `meta`, render.

mod activities;
mod attachments;
mod comments;
mod pages;
mod projects;
mod search;
mod tasks;
mod todos;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod activities_test;
#[cfg(test)]
mod projects_test;

use std::collections::BTreeMap;

use rmcp::ErrorData as McpError;
use serde_json::{Map, Value, json};
use tracing::{error, info, warn};

use crate::productive::{ApiError, ProductiveApi, QueryParams, clamp_page_size};
use crate::sanitize::Projection;

use super::McpServer;

pub use activities::GetRecentActivityParams;
pub use attachments::{GetAttachmentParams, GetAttachmentsParams};
pub use comments::{GetCommentParams, GetCommentsParams};
pub use pages::{GetPageParams, GetPagesParams};
pub use projects::GetProjectsParams;
pub use search::SearchRecentEntriesParams;
pub use tasks::{GetProjectTaskParams, GetProjectTasksParams, GetTaskParams, GetTasksParams};
pub use todos::{GetTodoParams, GetTodosParams};

/// Caller-supplied upstream filters, e.g. `{"filter[status][eq]": 1}`.
pub type ExtraFilters = BTreeMap<String, Value>;

/// Convert ApiError to McpError, logging at a level matching its severity.
pub(crate) fn map_api_error(err: ApiError, resource: &str) -> McpError {
    let status = err.status();
    let message = err.to_string();

    match err {
        ApiError::NotFound { .. } => {
            info!(resource, "No {} found", resource);
            McpError::resource_not_found(message, Some(json!({ "resource": resource })))
        }
        ApiError::Validation { .. } => {
            warn!(resource, error = %message, "Rejected tool arguments");
            McpError::invalid_params(message, None)
        }
        ApiError::RateLimited => {
            warn!(resource, "Productive API rate limit hit");
            McpError::internal_error(message, Some(json!({ "status": status })))
        }
        ApiError::Unauthorized => {
            error!(
                resource,
                "Invalid API token - check PRODUCTIVE_API_KEY and PRODUCTIVE_ORGANIZATION"
            );
            McpError::internal_error(message, Some(json!({ "status": status })))
        }
        ApiError::Upstream { ref code, .. } => {
            error!(resource, ?status, ?code, "Productive API error: {}", message);
            let data = json!({ "status": status, "code": code });
            McpError::internal_error(message, Some(data))
        }
        ApiError::Transport { .. } => {
            error!(resource, "Request to Productive failed: {}", message);
            McpError::internal_error(message, None)
        }
    }
}

/// Reject ids that cannot be placed into a URL path segment as-is.
pub(crate) fn validate_id(name: &str, id: &str) -> Result<(), McpError> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(map_api_error(
            ApiError::validation(format!("{name} must be a non-empty alphanumeric id")),
            name,
        ));
    }
    Ok(())
}

/// `{"data": [], "meta": {"message": ...}}`, plus any extra meta entries.
pub(crate) fn empty_result(message: impl Into<String>, extra_meta: Map<String, Value>) -> Value {
    let mut meta = Map::new();
    meta.insert("message".to_string(), Value::String(message.into()));
    meta.extend(extra_meta);
    json!({ "data": [], "meta": meta })
}

pub(crate) fn has_data(raw: &Value) -> bool {
    match raw.get("data") {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

/// Merge `entries` into the envelope's `meta`, creating it when absent.
pub(crate) fn extend_meta(envelope: &mut Value, entries: Map<String, Value>) {
    if entries.is_empty() {
        return;
    }
    if let Value::Object(map) = envelope {
        let meta = map
            .entry("meta")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(meta) = meta {
            meta.extend(entries);
        }
    }
}

/// Pagination for a list request: the query to start from plus any clamp
/// warning to echo back.
pub(crate) struct Paging {
    pub query: QueryParams,
    pub warnings: Vec<String>,
}

impl Paging {
    pub(crate) fn new(page_number: Option<u32>, page_size: u32) -> Self {
        let (size, warning) = clamp_page_size(page_size);
        let mut query = QueryParams::new();
        query.page(page_number, size);
        Self {
            query,
            warnings: warning.into_iter().collect(),
        }
    }

    pub(crate) fn warnings_meta(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        if !self.warnings.is_empty() {
            meta.insert("warnings".to_string(), json!(self.warnings));
        }
        meta
    }
}

impl<A: ProductiveApi + 'static> McpServer<A> {
    pub(crate) fn paging(&self, page_number: Option<u32>, page_size: Option<u32>) -> Paging {
        Paging::new(
            page_number,
            page_size.unwrap_or(self.config.items_per_page),
        )
    }

    /// Fetch a single resource and sanitize it with the full projection.
    pub(crate) async fn fetch_one(
        &self,
        collection: &str,
        id_name: &str,
        id: &str,
    ) -> Result<Value, McpError> {
        validate_id(id_name, id)?;
        info!("Fetching {} {}", collection, id);

        let path = format!("/{collection}/{id}");
        let raw = self
            .api
            .get(&path, &QueryParams::new())
            .await
            .map_err(|e| map_api_error(e, collection))?;

        info!("Successfully retrieved {} {}", collection, id);
        Ok(self.sanitizer(Projection::Full).sanitize(&raw))
    }

    /// Fetch a list endpoint.
    ///
    /// Caller filters are merged over the synthesized query. A 404 becomes an
    /// empty list with an explanatory message, and the `data` list survives
    /// sanitization even when every element was pruned.
    pub(crate) async fn fetch_list(
        &self,
        collection: &str,
        paging: Paging,
        extra_filters: Option<&ExtraFilters>,
        projection: Projection,
    ) -> Result<Value, McpError> {
        let mut query = paging.query.clone();
        if let Some(extra) = extra_filters {
            query.merge(extra).map_err(|e| map_api_error(e, collection))?;
        }

        info!("Fetching {}", collection);
        let raw = match self.api.get(&format!("/{collection}"), &query).await {
            Ok(raw) => raw,
            Err(ApiError::NotFound { .. }) => {
                warn!("No {} found", collection);
                let mut result = empty_result(format!("No {collection} found"), Map::new());
                extend_meta(&mut result, paging.warnings_meta());
                return Ok(result);
            }
            Err(e) => return Err(map_api_error(e, collection)),
        };
        info!("Successfully retrieved {}", collection);

        let mut cleaned = self.sanitizer(projection).sanitize(&raw);
        keep_data_list(&raw, &mut cleaned);
        extend_meta(&mut cleaned, paging.warnings_meta());
        Ok(cleaned)
    }
}

/// Restore `data: []` when pruning removed a list `data` entirely.
pub(crate) fn keep_data_list(raw: &Value, cleaned: &mut Value) {
    if !matches!(raw.get("data"), Some(Value::Array(_))) {
        return;
    }
    if let Value::Object(map) = cleaned {
        if !map.contains_key("data") {
            let mut restored = Map::new();
            restored.insert("data".to_string(), Value::Array(Vec::new()));
            restored.extend(std::mem::take(map));
            *map = restored;
        }
    }
}
