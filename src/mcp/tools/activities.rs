//! MCP tool for the activity feed.

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

use super::{Paging, empty_result, extend_meta, has_data, keep_data_list, map_api_error};
use crate::activity::{self, ActivityType, DEFAULT_ACTIVITY_HOURS};
use crate::mcp::McpServer;
use crate::productive::{ApiError, ProductiveApi};
use crate::sanitize::Projection;

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetRecentActivityParams {
    #[schemars(description = "How many hours to look back (default: 24)")]
    pub hours: Option<u32>,
    #[schemars(description = "Only activity by this person")]
    pub user_id: Option<u64>,
    #[schemars(description = "Only activity in this project")]
    pub project_id: Option<u64>,
    #[schemars(description = "Only this kind of activity: comment, changeset or email")]
    pub activity_type: Option<ActivityType>,
    #[schemars(description = "Only activity on this item type, e.g. 'Task', 'Page', 'Deal'")]
    pub item_type: Option<String>,
    #[schemars(description = "Only this event, e.g. 'create', 'update', 'delete'")]
    pub event_type: Option<String>,
    #[schemars(description = "Only activity on this task (internal task ID)")]
    pub task_id: Option<u64>,
    #[schemars(
        description = "Maximum activities to return (default from server configuration, max 200)"
    )]
    pub max_results: Option<u32>,
}

#[tool_router(router = activity_router, vis = "pub(crate)")]
impl<A: ProductiveApi + 'static> McpServer<A> {
    #[tool(
        description = "Summarize what changed recently: activities (comments, changes, emails) within the last N hours, optionally narrowed by person, project, task, activity type, item type or event. The meta section counts activities by type, event and item type."
    )]
    pub async fn get_recent_activity(
        &self,
        params: Parameters<GetRecentActivityParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let hours = params.hours.unwrap_or(DEFAULT_ACTIVITY_HOURS);
        let cutoff = activity::cutoff(hours).map_err(|e| map_api_error(e, "activities"))?;

        let mut paging = Paging::new(
            None,
            params.max_results.unwrap_or(self.config.items_per_page),
        );
        paging
            .query
            .set("filter[after]", &cutoff)
            .set_opt("filter[person_id]", params.user_id)
            .set_opt("filter[project_id]", params.project_id)
            .set_opt("filter[type]", params.activity_type.map(ActivityType::code))
            .set_opt("filter[item_type]", params.item_type.as_deref())
            .set_opt("filter[event]", params.event_type.as_deref())
            .set_opt("filter[task_id]", params.task_id);

        info!("Fetching activities from the last {} hours", hours);

        let raw = match self.api.get("/activities", &paging.query).await {
            Ok(raw) => raw,
            Err(ApiError::NotFound { .. }) => Value::Null,
            Err(e) => return Err(map_api_error(e, "activities")),
        };

        let mut meta = Map::new();
        meta.insert("hours".to_string(), json!(hours));
        meta.insert(
            "filters_applied".to_string(),
            Value::Object(paging.query.applied_filters()),
        );
        meta.insert("cutoff_time".to_string(), json!(cutoff));
        meta.extend(paging.warnings_meta());

        if !has_data(&raw) {
            info!("No recent activities found");
            let result = empty_result(format!("No activities found in the last {hours} hours"), meta);
            return self.respond(&result);
        }

        let mut result = self.sanitizer(Projection::Full).sanitize(&raw);
        keep_data_list(&raw, &mut result);

        let activities: &[Value] = match result.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        };
        meta.insert(
            "activity_summary".to_string(),
            activity::summarize(activities),
        );
        meta.insert("total_activities".to_string(), json!(activities.len()));
        extend_meta(&mut result, meta);

        info!("Successfully retrieved recent activities");
        self.respond(&result)
    }
}
