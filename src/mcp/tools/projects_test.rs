//! Tests for Project MCP tools

use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Value, json};

use crate::mcp::tools::GetProjectsParams;
use crate::mcp::tools::test_support::{StubApi, json_of, server_with};

fn projects_body() -> Value {
    json!({
        "data": [{
            "id": "9",
            "type": "projects",
            "attributes": {
                "name": "Website",
                "number": "12",
                "project_number": "P-12",
                "last_activity_at": "2025-01-03T10:00:00Z",
                "archived_at": null,
                "budget": 1000,
                "preferences": {"color": "blue"},
                "template": false
            },
            "relationships": {
                "organization": {"data": {"type": "organizations", "id": "27956"}},
                "company": {"data": {"type": "companies", "id": "2"}}
            },
            "links": {"self": "https://api.productive.io/api/v2/projects/9"}
        }],
        "links": {"first": "https://api.productive.io/api/v2/projects?page[number]=1"},
        "meta": {
            "current_page": 1,
            "total_pages": 1,
            "total_count": 1,
            "page_size": 50,
            "max_page_size": 200,
            "included": true,
            "settings": {"x": 1}
        }
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_projects_default_query() {
    let (server, api) = server_with(StubApi::new());

    server
        .get_projects(Parameters(GetProjectsParams::default()))
        .await
        .expect("get_projects should succeed");

    let (path, query) = api.single_call();
    assert_eq!(path, "/projects");
    assert_eq!(
        query.pairs(),
        vec![("page[size]", "50"), ("sort", "-last_activity_at")]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_projects_compact_view_uses_whitelist() {
    let (server, _api) = server_with(StubApi::new().respond_with(Ok(projects_body())));

    let result = server
        .get_projects(Parameters(GetProjectsParams::default()))
        .await
        .unwrap();

    assert_eq!(
        json_of(&result),
        json!({
            "data": [{
                "id": "9",
                "type": "projects",
                "attributes": {
                    "name": "Website",
                    "number": "12",
                    "project_number": "P-12",
                    "last_activity_at": "2025-01-03T10:00:00Z",
                    "template": false
                },
                "webapp_url": "https://app.productive.io/27956/projects/9"
            }],
            "meta": {
                "current_page": 1,
                "total_pages": 1,
                "total_count": 1,
                "page_size": 50,
                "max_page_size": 200
            }
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_projects_detailed_keeps_general_fields() {
    let (server, _api) = server_with(StubApi::new().respond_with(Ok(projects_body())));

    let result = server
        .get_projects(Parameters(GetProjectsParams {
            detailed: Some(true),
            ..Default::default()
        }))
        .await
        .unwrap();
    let output = json_of(&result);
    let project = &output["data"][0];

    assert_eq!(project["attributes"]["budget"], 1000);
    assert!(project["attributes"].get("preferences").is_none());
    assert_eq!(project["relationships"]["company"]["data"]["id"], "2");
    assert!(project["relationships"].get("organization").is_none());
    assert_eq!(output["meta"]["included"], true);
    assert!(output["meta"].get("settings").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_projects_paging_and_filters() {
    let (server, api) = server_with(StubApi::new());

    let extra = [("filter[status]".to_string(), json!(1))].into_iter().collect();
    server
        .get_projects(Parameters(GetProjectsParams {
            page_number: Some(3),
            page_size: Some(20),
            detailed: None,
            extra_filters: Some(extra),
        }))
        .await
        .unwrap();

    let (_, query) = api.single_call();
    assert_eq!(
        query.pairs(),
        vec![
            ("page[number]", "3"),
            ("page[size]", "20"),
            ("sort", "-last_activity_at"),
            ("filter[status]", "1"),
        ]
    );
}
