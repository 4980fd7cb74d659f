//! MCP tools for Todos (task checklist items).

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
pub struct GetTodosParams {
    #[schemars(description = "Only checklist items of this task (internal task ID)")]
    pub task_id: Option<u64>,
    #[schemars(description = "Page number to fetch (1-based). Omit for the first page.")]
    pub page_number: Option<u32>,
    #[schemars(description = "Todos per page (default from server configuration, max 200)")]
    pub page_size: Option<u32>,
    #[schemars(
        description = "Extra Productive filters, e.g. {\"filter[status]\": 1} for open items or {\"filter[assignee_id]\": 5}. Applied last, overriding defaults."
    )]
    pub extra_filters: Option<ExtraFilters>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTodoParams {
    #[schemars(description = "Todo ID")]
    pub todo_id: String,
}

#[tool_router(router = todo_router, vis = "pub(crate)")]
impl<A: ProductiveApi + 'static> McpServer<A> {
    #[tool(
        description = "List todo checklist items, optionally for one task. The API does not support sorting; items come in their default order."
    )]
    pub async fn get_todos(
        &self,
        params: Parameters<GetTodosParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let mut paging = self.paging(params.page_number, params.page_size);
        if let Some(task_id) = params.task_id {
            paging.query.set_list("filter[task_id]", [task_id]);
        }

        let result = self
            .fetch_list("todos", paging, params.extra_filters.as_ref(), Projection::Full)
            .await?;
        self.respond(&result)
    }

    #[tool(description = "Get a single todo checklist item by ID.")]
    pub async fn get_todo(
        &self,
        params: Parameters<GetTodoParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.fetch_one("todos", "todo_id", &params.0.todo_id).await?;
        self.respond(&result)
    }
}
