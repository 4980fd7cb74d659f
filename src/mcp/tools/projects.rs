//! MCP tools for Projects.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

use super::ExtraFilters;
use crate::mcp::McpServer;
use crate::productive::ProductiveApi;
use crate::sanitize::Projection;

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetProjectsParams {
    #[schemars(description = "Page number to fetch (1-based). Omit for the first page.")]
    pub page_number: Option<u32>,
    #[schemars(description = "Projects per page (default from server configuration, max 200)")]
    pub page_size: Option<u32>,
    #[schemars(
        description = "Return every project attribute and relationship instead of the compact browsing view (default: false)"
    )]
    pub detailed: Option<bool>,
    #[schemars(
        description = "Extra Productive query parameters, e.g. {\"filter[status]\": 1}. Applied last, overriding defaults."
    )]
    pub extra_filters: Option<ExtraFilters>,
}

#[tool_router(router = project_router, vis = "pub(crate)")]
impl<A: ProductiveApi + 'static> McpServer<A> {
    #[tool(
        description = "List projects, most recently active first. Each project includes its name, number, type, last activity, time on tasks and a webapp_url. Use the project id with get_project_tasks, get_project_task, get_pages or get_recent_activity."
    )]
    pub async fn get_projects(
        &self,
        params: Parameters<GetProjectsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let projection = if params.detailed.unwrap_or(false) {
            Projection::Full
        } else {
            Projection::ProjectWhitelist
        };

        let mut paging = self.paging(params.page_number, params.page_size);
        paging.query.set("sort", "-last_activity_at");

        let result = self
            .fetch_list("projects", paging, params.extra_filters.as_ref(), projection)
            .await?;
        self.respond(&result)
    }
}
