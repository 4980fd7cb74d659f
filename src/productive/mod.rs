//! Productive.io API access.
//!
//! - `client`: reqwest-based HTTP client with status classification
//! - `error`: the closed error taxonomy surfaced to the tool layer
//! - `query`: filter/sort/pagination parameter builder
//!
//! The tool layer depends on the [`ProductiveApi`] trait rather than the
//! concrete client, so tools can be exercised against an in-memory double.

mod client;
mod error;
mod query;


use std::future::Future;

use serde_json::Value;

pub use client::ProductiveClient;
pub use error::{ApiError, ApiResult};
pub use query::{ParamValue, QueryParams, clamp_page_size};

/// Read access to the Productive API.
///
/// Every method performs at most one upstream request.
pub trait ProductiveApi: Send + Sync {
    /// GET `path` (relative to the API base URL) with the given query.
    fn get(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> impl Future<Output = ApiResult<Value>> + Send;
}

/// Install the process-wide rustls crypto provider.
///
/// reqwest is built without a bundled provider; installing twice is harmless.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}
