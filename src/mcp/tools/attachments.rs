//! MCP tools for Attachments. Only file metadata is returned, never content.

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
pub struct GetAttachmentsParams {
    #[schemars(description = "Page number to fetch (1-based). Omit for the first page.")]
    pub page_number: Option<u32>,
    #[schemars(description = "Attachments per page (default from server configuration, max 200)")]
    pub page_size: Option<u32>,
    #[schemars(
        description = "Extra Productive filters, e.g. {\"filter[task_id]\": 12}. Applied last, overriding defaults."
    )]
    pub extra_filters: Option<ExtraFilters>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetAttachmentParams {
    #[schemars(description = "Attachment ID")]
    pub attachment_id: String,
}

#[tool_router(router = attachment_router, vis = "pub(crate)")]
impl<A: ProductiveApi + 'static> McpServer<A> {
    #[tool(
        description = "List attachment metadata (file name, type, size, owner). The API does not support sorting."
    )]
    pub async fn get_attachments(
        &self,
        params: Parameters<GetAttachmentsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let paging = self.paging(params.page_number, params.page_size);

        let result = self
            .fetch_list(
                "attachments",
                paging,
                params.extra_filters.as_ref(),
                Projection::Full,
            )
            .await?;
        self.respond(&result)
    }

    #[tool(description = "Get metadata of a single attachment by ID.")]
    pub async fn get_attachment(
        &self,
        params: Parameters<GetAttachmentParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .fetch_one("attachments", "attachment_id", &params.0.attachment_id)
            .await?;
        self.respond(&result)
    }
}
