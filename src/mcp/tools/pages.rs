//! MCP tools for Pages (project documents).

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::mcp::McpServer;
use crate::productive::ProductiveApi;
use crate::sanitize::Projection;

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetPagesParams {
    #[schemars(description = "Only pages of this project")]
    pub project_id: Option<u64>,
    #[schemars(description = "Only pages created by this person")]
    pub creator_id: Option<u64>,
    #[schemars(description = "Page number to fetch (1-based). Omit for the first page.")]
    pub page_number: Option<u32>,
    #[schemars(description = "Pages per page (default from server configuration, max 200)")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetPageParams {
    #[schemars(description = "Page ID")]
    pub page_id: String,
}

#[tool_router(router = page_router, vis = "pub(crate)")]
impl<A: ProductiveApi + 'static> McpServer<A> {
    #[tool(
        description = "List pages (project documents), most recently updated first. Page bodies are omitted; use get_page to read one."
    )]
    pub async fn get_pages(
        &self,
        params: Parameters<GetPagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let mut paging = self.paging(params.page_number, params.page_size);
        paging
            .query
            .set_opt("filter[project_id][eq]", params.project_id)
            .set_opt("filter[creator_id][eq]", params.creator_id)
            .set("sort", "-updated_at");

        let result = self
            .fetch_list("pages", paging, None, Projection::Lean)
            .await?;
        self.respond(&result)
    }

    #[tool(description = "Get a single page by ID, including its body as plain text.")]
    pub async fn get_page(
        &self,
        params: Parameters<GetPageParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.fetch_one("pages", "page_id", &params.0.page_id).await?;
        self.respond(&result)
    }
}
