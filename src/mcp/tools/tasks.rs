//! MCP tools for Task browsing and lookup.

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
use tracing::{info, warn};

use super::{ExtraFilters, empty_result, extend_meta, has_data, map_api_error, validate_id};
use crate::mcp::McpServer;
use crate::productive::{ApiError, ProductiveApi, QueryParams};
use crate::sanitize::Projection;

const DEFAULT_TASK_SORT: &str = "-last_activity_at";

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetTasksParams {
    #[schemars(description = "Only tasks of this project")]
    pub project_id: Option<u64>,
    #[schemars(description = "Page number to fetch (1-based). Omit for the first page.")]
    pub page_number: Option<u32>,
    #[schemars(
        description = "Tasks per page (default from server configuration). Values above 200 are clamped to 200."
    )]
    pub page_size: Option<u32>,
    #[schemars(
        description = "Sort field, '-' prefix for descending: last_activity_at, created_at, due_date, title (default: -last_activity_at)"
    )]
    pub sort: Option<String>,
    #[schemars(
        description = "Extra Productive filters, e.g. {\"filter[status][eq]\": 1, \"filter[assignee_id][eq]\": 42}. Applied last, overriding defaults."
    )]
    pub extra_filters: Option<ExtraFilters>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTaskParams {
    #[schemars(description = "Internal Productive task ID (not the project task number)")]
    pub task_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetProjectTasksParams {
    #[schemars(description = "Project ID")]
    pub project_id: u64,
    #[schemars(description = "Task status: 1 = open, 2 = closed. Omit for both.")]
    pub status: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetProjectTaskParams {
    #[schemars(description = "Task number as shown in the project, e.g. '42' for task #42")]
    pub task_number: String,
    #[schemars(description = "Project ID the task number belongs to")]
    pub project_id: u64,
}

// =============================================================================
// Task Tools
// =============================================================================

#[tool_router(router = task_router, vis = "pub(crate)")]
impl<A: ProductiveApi + 'static> McpServer<A> {
    #[tool(
        description = "List tasks across projects, most recently active first. Returns a compact view (title, number, status, timestamps, time tracking) without descriptions; use get_task for full details."
    )]
    pub async fn get_tasks(
        &self,
        params: Parameters<GetTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let mut paging = self.paging(params.page_number, params.page_size);
        paging
            .query
            .set_opt("filter[project_id][eq]", params.project_id)
            .set("sort", params.sort.as_deref().unwrap_or(DEFAULT_TASK_SORT));

        let result = self
            .fetch_list("tasks", paging, params.extra_filters.as_ref(), Projection::Lean)
            .await?;
        self.respond(&result)
    }

    #[tool(
        description = "Get a task by its internal ID with full details, including the description as plain text and its relationships."
    )]
    pub async fn get_task(
        &self,
        params: Parameters<GetTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.fetch_one("tasks", "task_id", &params.0.task_id).await?;
        self.respond(&result)
    }

    #[tool(
        description = "List the tasks of one project, most recently active first, optionally only open (status 1) or closed (status 2) ones. Returns the compact task view."
    )]
    pub async fn get_project_tasks(
        &self,
        params: Parameters<GetProjectTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let GetProjectTasksParams { project_id, status } = params.0;
        if let Some(status) = status.filter(|s| !matches!(*s, 1 | 2)) {
            return Err(map_api_error(
                ApiError::validation(format!(
                    "status must be 1 (open) or 2 (closed), got {status}"
                )),
                "tasks",
            ));
        }

        info!("Fetching all tasks for project {}", project_id);

        let mut paging = self.paging(None, None);
        paging
            .query
            .set("filter[project_id][eq]", project_id)
            .set_opt("filter[status][eq]", status)
            .set("sort", DEFAULT_TASK_SORT);

        let raw = match self.api.get("/tasks", &paging.query).await {
            Ok(raw) => raw,
            Err(ApiError::NotFound { .. }) => Value::Null,
            Err(e) => return Err(map_api_error(e, "tasks")),
        };

        if !has_data(&raw) {
            info!("No tasks found for project {}", project_id);
            let mut meta = Map::new();
            meta.insert(
                "filters_applied".to_string(),
                Value::Object(paging.query.applied_filters()),
            );
            let result = empty_result(format!("No tasks found for project {project_id}"), meta);
            return self.respond(&result);
        }

        let mut result = self.sanitizer(Projection::Lean).sanitize(&raw);
        extend_meta(&mut result, paging.warnings_meta());
        info!("Successfully retrieved tasks for project {}", project_id);
        self.respond(&result)
    }

    #[tool(
        description = "Get a task by its project-scoped task number (the '#42' shown in Productive) with full details. Fails with a not-found error when the project has no such task."
    )]
    pub async fn get_project_task(
        &self,
        params: Parameters<GetProjectTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let GetProjectTaskParams {
            task_number,
            project_id,
        } = params.0;
        validate_id("task_number", &task_number)?;

        info!("Fetching task #{} from project {}", task_number, project_id);

        let mut query = QueryParams::new();
        query
            .set("filter[project_id][eq]", project_id)
            .set("filter[task_number][eq]", &task_number);

        let raw = self
            .api
            .get("/tasks", &query)
            .await
            .map_err(|e| map_api_error(e, "tasks"))?;

        let matches: &[Value] = match raw.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };
        let Some(task) = matches.first() else {
            return Err(map_api_error(
                ApiError::not_found(format!(
                    "Task #{task_number} not found in project {project_id}"
                )),
                "tasks",
            ));
        };
        if matches.len() > 1 {
            warn!(
                count = matches.len(),
                "Task #{} matched several tasks in project {}, using the first",
                task_number,
                project_id
            );
        }

        let result = self
            .sanitizer(Projection::Full)
            .sanitize(&json!({ "data": task }));
        info!("Successfully retrieved task #{}", task_number);
        self.respond(&result)
    }
}
