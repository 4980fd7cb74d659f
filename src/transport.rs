//! Transport wiring: tracing setup and the stdio / Streamable HTTP runners.

use std::net::IpAddr;
use std::sync::Arc;

use axum::Router;
use clap::ValueEnum;
use miette::Diagnostic;
use rmcp::ServiceExt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::mcp::{McpServer, create_mcp_service};
use crate::productive::ProductiveApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    #[default]
    Stdio,
    /// Streamable HTTP under /mcp
    Http,
}

/// Listen address for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Error, Diagnostic, Debug)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(productive_mcp::transport::io))]
    Io(#[from] std::io::Error),

    #[error("MCP session failed: {0}")]
    #[diagnostic(code(productive_mcp::transport::session))]
    Session(String),
}

/// Initialize tracing subscriber with env filter
///
/// Logs go to stderr; stdout belongs to the stdio transport.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "productive_mcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Serve one MCP session over stdin/stdout until the client disconnects.
pub async fn run_stdio<A: ProductiveApi + 'static>(
    api: Arc<A>,
    config: Arc<Config>,
) -> Result<(), TransportError> {
    info!("Productive MCP server running on stdio");

    let service = McpServer::new(api, config)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| TransportError::Session(e.to_string()))?;

    let reason = service
        .waiting()
        .await
        .map_err(|e| TransportError::Session(e.to_string()))?;
    info!(?reason, "MCP session closed");
    Ok(())
}

/// Router with the MCP service mounted at `/mcp`.
pub fn http_router<A: ProductiveApi + 'static>(
    api: Arc<A>,
    config: Arc<Config>,
    cancellation_token: CancellationToken,
) -> Router {
    Router::new()
        .nest_service("/mcp", create_mcp_service(api, config, cancellation_token))
        .layer(TraceLayer::new_for_http())
}

/// Serve Streamable HTTP until Ctrl-C.
pub async fn run_http<A: ProductiveApi + 'static>(
    api: Arc<A>,
    config: Arc<Config>,
    http: HttpConfig,
) -> Result<(), TransportError> {
    let ct = CancellationToken::new();
    let app = http_router(api, config, ct.clone());

    let addr = format!("{}:{}", http.host, http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Productive MCP server listening on http://{}/mcp", addr);

    let shutdown = ct.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down");
        }
        shutdown.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await?;
    Ok(())
}
