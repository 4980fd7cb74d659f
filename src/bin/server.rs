//! Productive MCP server binary.
//!
//! Loads configuration from the environment, builds the Productive HTTP
//! client and serves the MCP tools over the selected transport.

use std::net::IpAddr;
use std::sync::Arc;

use clap::Parser;
use miette::Diagnostic;
use productive_mcp::config::{Config, ConfigError};
use productive_mcp::productive::{ApiError, ProductiveClient};
use productive_mcp::transport::{self, HttpConfig, Transport, TransportError};
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create Productive client: {0}")]
    #[diagnostic(code(productive_mcp::binary::client))]
    Client(#[from] ApiError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Parser)]
#[command(name = "productive-mcp")]
#[command(author, version, about = "MCP server for the Productive.io API", long_about = None)]
struct Cli {
    /// Transport to serve the MCP protocol over
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Host address to bind to (http transport)
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on (http transport)
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    run().await.map_err(miette::Report::new)
}

async fn run() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    transport::init_tracing();

    let config = Arc::new(Config::from_env()?);
    info!(
        base_url = %config.base_url,
        organization = config.organization_id,
        output_format = %config.output_format,
        "Configuration loaded"
    );

    let client = Arc::new(ProductiveClient::new(&config)?);

    match cli.transport {
        Transport::Stdio => transport::run_stdio(client, config).await?,
        Transport::Http => {
            let http = HttpConfig {
                host: cli.host,
                port: cli.port,
            };
            transport::run_http(client, config, http).await?
        }
    }

    Ok(())
}
