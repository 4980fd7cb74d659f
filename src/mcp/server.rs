//! MCP server implementation
//!
//! The server owns the shared upstream client and configuration and exposes
//! one tool per Productive read operation. Tool methods live in per-resource
//! modules under `tools`; each contributes its own router, combined here.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool_handler,
};
use serde_json::Value;

use crate::config::Config;
use crate::productive::ProductiveApi;
use crate::sanitize::{Projection, Sanitizer};

const INSTRUCTIONS: &str = "Productive MCP Server - read-only access to Productive.io projects, tasks, \
comments, todos, pages, attachments and the activity feed. \
Start with get_projects to find project ids, then get_project_tasks or get_tasks to browse work. \
Use get_project_task when you know a task's number within a project, and get_task for its full \
description. get_recent_activity summarizes what changed in the last hours; \
search_recent_entries searches 90 days of activity text. \
Every resource carries a webapp_url that links to it in the Productive web app.";

/// Main MCP server coordinator
///
/// Generic over `A: ProductiveApi` so tools can run against the real HTTP
/// client or an in-memory double.
pub struct McpServer<A: ProductiveApi> {
    pub(crate) api: Arc<A>,
    pub(crate) config: Arc<Config>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl<A: ProductiveApi> Clone for McpServer<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            config: Arc::clone(&self.config),
            tool_router: self.tool_router.clone(),
        }
    }
}

impl<A: ProductiveApi + 'static> McpServer<A> {
    /// Create a new MCP server over the given API client
    pub fn new(api: Arc<A>, config: Arc<Config>) -> Self {
        Self {
            api,
            config,
            tool_router: Self::project_router()
                + Self::task_router()
                + Self::comment_router()
                + Self::todo_router()
                + Self::page_router()
                + Self::attachment_router()
                + Self::activity_router()
                + Self::search_router(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn sanitizer(&self, projection: Projection) -> Sanitizer {
        Sanitizer::from_config(&self.config).with_projection(projection)
    }

    /// Render a response in the configured output format.
    pub(crate) fn respond(&self, value: &Value) -> Result<CallToolResult, McpError> {
        let text = self
            .config
            .output_format
            .render(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl<A: ProductiveApi + 'static> ServerHandler for McpServer<A> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }
}
