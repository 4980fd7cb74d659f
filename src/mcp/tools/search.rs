//! MCP tool for text search over recent activity.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;

use super::{empty_result, extend_meta, has_data, keep_data_list, map_api_error};
use crate::activity::{self, SEARCH_FIELDS, SEARCH_WINDOW_HOURS};
use crate::config::MAX_PAGE_SIZE;
use crate::mcp::McpServer;
use crate::productive::{ApiError, ProductiveApi, QueryParams};
use crate::sanitize::Projection;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchRecentEntriesParams {
    #[schemars(description = "Text to look for (case-insensitive substring)")]
    pub query: String,
}

#[tool_router(router = search_router, vis = "pub(crate)")]
impl<A: ProductiveApi + 'static> McpServer<A> {
    #[tool(
        description = "Search the last 90 days of activity (tasks, pages, comments, discussions and more) for a term. Matches titles, bodies, item names, person names and project names, case-insensitively. Searches the 200 most recent activities."
    )]
    pub async fn search_recent_entries(
        &self,
        params: Parameters<SearchRecentEntriesParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = params.0.query;

        if query.trim().is_empty() {
            let mut meta = Map::new();
            meta.insert("query".to_string(), json!(query));
            meta.insert("total_matches".to_string(), json!(0));
            return self.respond(&empty_result("Empty search query provided", meta));
        }

        let cutoff =
            activity::cutoff(SEARCH_WINDOW_HOURS).map_err(|e| map_api_error(e, "activities"))?;
        let mut upstream = QueryParams::new();
        upstream
            .set("filter[after]", &cutoff)
            .set("page[size]", MAX_PAGE_SIZE);

        info!(
            "Searching {} activities for '{}' in the last 90 days",
            MAX_PAGE_SIZE, query
        );

        let raw = match self.api.get("/activities", &upstream).await {
            Ok(raw) => raw,
            Err(ApiError::NotFound { .. }) => Value::Null,
            Err(e) => return Err(map_api_error(e, "activities")),
        };

        let mut meta = Map::new();
        meta.insert("query".to_string(), json!(query));

        if !has_data(&raw) {
            info!("No activities found in the last 90 days");
            meta.insert("total_matches".to_string(), json!(0));
            meta.insert("cutoff_time".to_string(), json!(cutoff));
            return self.respond(&empty_result(
                "No activities found in the last 90 days",
                meta,
            ));
        }

        let searched: &[Value] = match raw.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };
        let matches = activity::search(searched, &query);

        let envelope = json!({ "data": matches });
        let mut result = self.sanitizer(Projection::Full).sanitize(&envelope);
        keep_data_list(&envelope, &mut result);

        meta.insert("total_matches".to_string(), json!(matches.len()));
        meta.insert("total_searched".to_string(), json!(searched.len()));
        meta.insert("cutoff_time".to_string(), json!(cutoff));
        meta.insert("search_fields".to_string(), json!(SEARCH_FIELDS));
        extend_meta(&mut result, meta);

        info!(
            "Search completed: {} matches found out of {} activities",
            matches.len(),
            searched.len()
        );
        self.respond(&result)
    }
}
