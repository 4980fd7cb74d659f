//! In-memory `ProductiveApi` double and helpers shared by the tool tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Value, json};

use crate::config::Config;
use crate::mcp::McpServer;
use crate::productive::{ApiResult, ProductiveApi, QueryParams};

pub const ORG_ID: u64 = 27956;

/// Records every request and replays queued responses in order.
///
/// Once the queue is exhausted, requests get `{"data": []}`.
#[derive(Default)]
pub struct StubApi {
    responses: Mutex<VecDeque<ApiResult<Value>>>,
    calls: Mutex<Vec<(String, QueryParams)>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, response: ApiResult<Value>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<(String, QueryParams)> {
        self.calls.lock().unwrap().clone()
    }

    /// The only request made; panics unless exactly one was sent.
    pub fn single_call(&self) -> (String, QueryParams) {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one upstream call");
        calls.into_iter().next().unwrap()
    }
}

impl ProductiveApi for StubApi {
    async fn get(&self, path: &str, query: &QueryParams) -> ApiResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), query.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "data": [] })))
    }
}

pub fn test_config(overrides: &[(&str, &str)]) -> Arc<Config> {
    let mut vars: HashMap<String, String> = [
        ("PRODUCTIVE_API_KEY", "test-token"),
        ("PRODUCTIVE_ORGANIZATION", "27956"),
        ("OUTPUT_FORMAT", "json"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Arc::new(Config::from_lookup(|key| vars.get(key).cloned()).unwrap())
}

/// Server over `api` with JSON output, plus a handle for inspecting calls.
pub fn server_with(api: StubApi) -> (McpServer<StubApi>, Arc<StubApi>) {
    let api = Arc::new(api);
    let server = McpServer::new(Arc::clone(&api), test_config(&[]));
    (server, api)
}

pub fn text_of(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    }
}

/// Parse the JSON text of a tool result.
pub fn json_of(result: &CallToolResult) -> Value {
    serde_json::from_str(text_of(result)).expect("tool output should be JSON")
}

pub fn task(id: &str, attributes: Value) -> Value {
    json!({
        "id": id,
        "type": "tasks",
        "attributes": attributes,
        "relationships": {
            "project": {"data": {"type": "projects", "id": "7"}},
            "organization": {"data": {"type": "organizations", "id": "27956"}}
        },
        "links": {"self": format!("https://api.productive.io/api/v2/tasks/{id}")}
    })
}
