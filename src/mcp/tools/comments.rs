//! MCP tools for Comments.

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
pub struct GetCommentsParams {
    #[schemars(description = "Only comments in this project")]
    pub project_id: Option<u64>,
    #[schemars(description = "Only comments on this task (internal task ID)")]
    pub task_id: Option<u64>,
    #[schemars(description = "Page number to fetch (1-based). Omit for the first page.")]
    pub page_number: Option<u32>,
    #[schemars(description = "Comments per page (default from server configuration, max 200)")]
    pub page_size: Option<u32>,
    #[schemars(
        description = "Extra Productive filters, e.g. {\"filter[discussion_id]\": 7} or {\"filter[page_id]\": 3}. Applied last, overriding defaults."
    )]
    pub extra_filters: Option<ExtraFilters>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetCommentParams {
    #[schemars(description = "Comment ID")]
    pub comment_id: String,
}

#[tool_router(router = comment_router, vis = "pub(crate)")]
impl<A: ProductiveApi + 'static> McpServer<A> {
    #[tool(
        description = "List comments, newest first, optionally for one project or task. Comment bodies are returned as plain text."
    )]
    pub async fn get_comments(
        &self,
        params: Parameters<GetCommentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let mut paging = self.paging(params.page_number, params.page_size);
        paging
            .query
            .set_opt("filter[project_id][eq]", params.project_id)
            .set_opt("filter[task_id][eq]", params.task_id)
            .set("sort", "-created_at");

        let result = self
            .fetch_list(
                "comments",
                paging,
                params.extra_filters.as_ref(),
                Projection::Full,
            )
            .await?;
        self.respond(&result)
    }

    #[tool(description = "Get a single comment by ID with its plain-text body and context.")]
    pub async fn get_comment(
        &self,
        params: Parameters<GetCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .fetch_one("comments", "comment_id", &params.0.comment_id)
            .await?;
        self.respond(&result)
    }
}
