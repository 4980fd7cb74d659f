//! Tests for MCP server initialization

use std::sync::Arc;

use rmcp::ServerHandler;
use serde_json::json;

use super::server::McpServer;
use crate::format::OutputFormat;
use crate::mcp::tools::test_support::{StubApi, test_config, text_of};

const TOOL_NAMES: [&str; 15] = [
    "get_projects",
    "get_tasks",
    "get_task",
    "get_project_tasks",
    "get_project_task",
    "get_comments",
    "get_comment",
    "get_todos",
    "get_todo",
    "get_recent_activity",
    "get_pages",
    "get_page",
    "get_attachments",
    "get_attachment",
    "search_recent_entries",
];

#[tokio::test]
async fn test_server_info() {
    let server = McpServer::new(Arc::new(StubApi::new()), test_config(&[]));

    let info = server.get_info();

    assert!(
        info.capabilities.tools.is_some(),
        "Server should support tools"
    );
    let instructions = info.instructions.expect("Server should provide instructions");
    assert!(instructions.contains("get_projects"));
}

#[tokio::test]
async fn test_every_tool_registered() {
    let server = McpServer::new(Arc::new(StubApi::new()), test_config(&[]));

    let mut names: Vec<String> = server
        .tool_router
        .list_all()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();
    names.sort();

    let mut expected: Vec<String> = TOOL_NAMES.iter().map(|n| n.to_string()).collect();
    expected.sort();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_tool_schemas_have_descriptions() {
    let server = McpServer::new(Arc::new(StubApi::new()), test_config(&[]));

    for tool in server.tool_router.list_all() {
        assert!(
            tool.description.as_deref().is_some_and(|d| !d.is_empty()),
            "tool {} needs a description",
            tool.name
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_output_follows_configured_format() {
    let body = json!({"data": {"id": "1", "type": "todos", "attributes": {"title": "Ship it"}}});

    let yaml = McpServer::new(
        Arc::new(StubApi::new().respond_with(Ok(body.clone()))),
        test_config(&[("OUTPUT_FORMAT", "yaml")]),
    );
    assert_eq!(yaml.config().output_format, OutputFormat::Yaml);
    let value = yaml.fetch_one("todos", "todo_id", "1").await.unwrap();
    let result = yaml.respond(&value).unwrap();
    assert!(text_of(&result).starts_with("data:\n  id: '1'\n"));

    let toon = McpServer::new(
        Arc::new(StubApi::new().respond_with(Ok(body))),
        test_config(&[("OUTPUT_FORMAT", "toon")]),
    );
    let value = toon.fetch_one("todos", "todo_id", "1").await.unwrap();
    let result = toon.respond(&value).unwrap();
    assert!(text_of(&result).contains("title: Ship it"));
}

#[tokio::test]
async fn test_servers_share_the_api_client() {
    let api = Arc::new(StubApi::new());
    let server = McpServer::new(Arc::clone(&api), test_config(&[]));
    let clone = server.clone();

    assert!(Arc::ptr_eq(&server.api, &clone.api));
    assert!(Arc::ptr_eq(&server.api, &api));
}
