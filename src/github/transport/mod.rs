//! Transports for calling the forge's REST and GraphQL surfaces.
//!
//! The [`ForgeTransport`] trait is the seam between the fetchers and the
//! process that holds forge credentials. [`GhCliTransport`] delegates to the
//! authenticated `gh` CLI; tests substitute mocks or a scripted transport.

mod gh_cli;
mod response;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use gh_cli::GhCliTransport;

use async_trait::async_trait;
use serde_json::Value;

use crate::github::error::DigestError;

/// Authenticated access to the forge API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForgeTransport: Send + Sync {
    /// Performs a REST `GET` for the given API path and returns the parsed
    /// JSON body.
    async fn call_rest(&self, path: &str) -> Result<Value, DigestError>;

    /// Executes a GraphQL query with the given variables object.
    ///
    /// Implementations surface a non-empty top-level `errors` list as
    /// [`DigestError::GraphQl`], even when `data` is also present.
    async fn call_graphql(&self, query: &str, variables: &Value) -> Result<Value, DigestError>;

    /// Returns the failed-step log output of a workflow run.
    async fn run_log(&self, run_id: u64) -> Result<String, DigestError>;
}
