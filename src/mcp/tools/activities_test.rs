//! Tests for the activity feed MCP tool

use chrono::{DateTime, Duration, Utc};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::ErrorCode;
use serde_json::{Value, json};

use crate::activity::ActivityType;
use crate::mcp::tools::GetRecentActivityParams;
use crate::mcp::tools::test_support::{StubApi, json_of, server_with};
use crate::productive::ApiError;

fn activity(id: &str, kind: &str, event: &str, item_type: &str) -> Value {
    json!({
        "id": id,
        "type": "activities",
        "attributes": {
            "type": kind,
            "event": event,
            "item_type": item_type,
            "body": "<p>Changed</p>"
        },
        "relationships": {
            "organization": {"data": {"type": "organizations", "id": "27956"}}
        }
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_recent_activity_filters() {
    let (server, api) = server_with(StubApi::new());

    server
        .get_recent_activity(Parameters(GetRecentActivityParams {
            hours: Some(48),
            user_id: Some(5),
            project_id: Some(7),
            activity_type: Some(ActivityType::Email),
            item_type: Some("Task".to_string()),
            event_type: Some("create".to_string()),
            task_id: Some(123),
            max_results: Some(20),
        }))
        .await
        .unwrap();

    let (path, query) = api.single_call();
    assert_eq!(path, "/activities");
    assert_eq!(query.get_str("page[size]"), Some("20"));
    assert_eq!(query.get_str("filter[person_id]"), Some("5"));
    assert_eq!(query.get_str("filter[project_id]"), Some("7"));
    assert_eq!(query.get_str("filter[type]"), Some("3"));
    assert_eq!(query.get_str("filter[item_type]"), Some("Task"));
    assert_eq!(query.get_str("filter[event]"), Some("create"));
    assert_eq!(query.get_str("filter[task_id]"), Some("123"));
    assert!(query.get("sort").is_none());

    let after = query.get_str("filter[after]").unwrap();
    let after: DateTime<Utc> = after.parse().unwrap();
    let expected = Utc::now() - Duration::hours(48);
    assert!((expected - after).num_seconds().abs() < 60);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_recent_activity_defaults() {
    let (server, api) = server_with(StubApi::new());

    server
        .get_recent_activity(Parameters(GetRecentActivityParams::default()))
        .await
        .unwrap();

    let (_, query) = api.single_call();
    let keys: Vec<&str> = query.pairs().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["page[size]", "filter[after]"]);
    assert_eq!(query.get_str("page[size]"), Some("50"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_recent_activity_summary_meta() {
    let body = json!({
        "data": [
            activity("1", "comment", "create", "Task"),
            activity("2", "comment", "update", "Task"),
            activity("3", "changeset", "create", "Page")
        ],
        "meta": {"current_page": 1}
    });
    let (server, _api) = server_with(StubApi::new().respond_with(Ok(body)));

    let result = server
        .get_recent_activity(Parameters(GetRecentActivityParams {
            project_id: Some(7),
            ..Default::default()
        }))
        .await
        .unwrap();
    let output = json_of(&result);

    let data = output["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["attributes"]["body"], "Changed");
    assert!(data[0].get("relationships").is_none());
    assert_eq!(
        data[0]["webapp_url"],
        "https://app.productive.io/27956/activities/1"
    );

    let meta = &output["meta"];
    assert_eq!(meta["current_page"], 1);
    assert_eq!(meta["hours"], 24);
    assert_eq!(meta["total_activities"], 3);
    assert_eq!(
        meta["activity_summary"],
        json!({
            "by_type": {"comment": 2, "changeset": 1},
            "by_event": {"create": 2, "update": 1},
            "by_item_type": {"Task": 2, "Page": 1},
            "total": 3
        })
    );
    assert_eq!(meta["filters_applied"]["project_id"], "7");
    assert_eq!(
        meta["filters_applied"]["after"], meta["cutoff_time"],
        "cutoff is echoed as both filter and meta"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_recent_activity_empty() {
    let (server, _api) = server_with(StubApi::new());

    let result = server
        .get_recent_activity(Parameters(GetRecentActivityParams {
            hours: Some(6),
            ..Default::default()
        }))
        .await
        .unwrap();
    let output = json_of(&result);

    assert_eq!(output["data"], json!([]));
    assert_eq!(output["meta"]["message"], "No activities found in the last 6 hours");
    assert_eq!(output["meta"]["hours"], 6);
    assert!(output["meta"]["cutoff_time"].is_string());
    assert!(output["meta"].get("activity_summary").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_recent_activity_clamps_max_results() {
    let (server, api) = server_with(StubApi::new());

    let result = server
        .get_recent_activity(Parameters(GetRecentActivityParams {
            max_results: Some(500),
            ..Default::default()
        }))
        .await
        .unwrap();

    let (_, query) = api.single_call();
    assert_eq!(query.get_str("page[size]"), Some("200"));
    assert!(json_of(&result)["meta"]["warnings"][0].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_recent_activity_propagates_api_error() {
    let api = StubApi::new().respond_with(Err(ApiError::validation("bad")));
    let (server, _api) = server_with(api);

    let err = server
        .get_recent_activity(Parameters(GetRecentActivityParams::default()))
        .await
        .unwrap_err();

    assert!(err.message.contains("bad"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_recent_activity_rejects_unrepresentable_window() {
    let (server, api) = server_with(StubApi::new());

    let err = server
        .get_recent_activity(Parameters(GetRecentActivityParams {
            hours: Some(u32::MAX),
            ..Default::default()
        }))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("hours"));
    assert!(api.calls().is_empty());
}
