//! Model Context Protocol (MCP) server implementation
//!
//! Exposes read-only Productive.io tools over stdio or the Streamable HTTP
//! transport.
//!
//! # Architecture
//!
//! - **server**: `McpServer`, which owns the API client and configuration
//! - **tools**: one module per resource, each contributing a tool router
//! - **service**: Streamable HTTP service for nesting into an Axum router
//!
//! The server is generic over `A: ProductiveApi`, so tools run unchanged
//! against the HTTP client or an in-memory double.

pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod server_test;

pub use server::McpServer;
pub use service::create_mcp_service;
