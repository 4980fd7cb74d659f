pub mod activity;
pub mod config;
pub mod format;
pub mod mcp;
pub mod productive;
pub mod sanitize;
pub mod transport;

#[cfg(test)]
mod config_test;
