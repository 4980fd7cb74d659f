//! MCP Streamable HTTP service creation

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::productive::ProductiveApi;

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// Every session gets its own `McpServer`, all sharing one API client and
/// configuration.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use productive_mcp::config::Config;
/// # use productive_mcp::mcp::create_mcp_service;
/// # use productive_mcp::productive::ProductiveClient;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::from_env()?);
/// let client = Arc::new(ProductiveClient::new(&config)?);
///
/// let ct = CancellationToken::new();
/// let mcp_service = create_mcp_service(client, config, ct);
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<A: ProductiveApi + 'static>(
    api: Arc<A>,
    config: Arc<Config>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<A>, LocalSessionManager> {
    // rmcp expects the factory to return io::Error
    let service_factory = move || -> Result<McpServer<A>, std::io::Error> {
        Ok(McpServer::new(Arc::clone(&api), Arc::clone(&config)))
    };

    let mut http_config = StreamableHttpServerConfig::default();
    http_config.stateful_mode = true;
    http_config.cancellation_token = cancellation_token;

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        http_config,
    )
}
