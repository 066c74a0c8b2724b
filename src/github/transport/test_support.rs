//! Scripted transport for tests that exercise whole fetch flows.
//!
//! Responses are queued per surface and handed out in order. Every call is
//! recorded so tests can assert on the paths, queries, and variables that
//! reached the transport.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::github::error::DigestError;

use super::ForgeTransport;

/// A call observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// A REST call for the given path.
    Rest {
        /// Requested API path.
        path: String,
    },
    /// A GraphQL call with its query text and variables.
    GraphQl {
        /// Query document.
        query: String,
        /// Variables object.
        variables: Value,
    },
    /// A workflow run log request.
    RunLog {
        /// Requested run identifier.
        run_id: u64,
    },
}

#[derive(Debug, Default)]
struct Script {
    rest: VecDeque<Result<Value, DigestError>>,
    graphql: VecDeque<Result<Value, DigestError>>,
    run_logs: HashMap<u64, Result<String, DigestError>>,
    calls: Vec<RecordedCall>,
}

/// Transport that replays queued responses.
///
/// Calls beyond the queued responses fail with
/// [`DigestError::TransportCall`] so that a test scripting too few pages
/// fails loudly rather than hanging.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<Script>,
}

impl ScriptedTransport {
    /// Creates a transport with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a REST response.
    #[must_use]
    pub fn with_rest(self, response: Result<Value, DigestError>) -> Self {
        self.lock().rest.push_back(response);
        self
    }

    /// Queues a GraphQL response.
    #[must_use]
    pub fn with_graphql(self, response: Result<Value, DigestError>) -> Self {
        self.lock().graphql.push_back(response);
        self
    }

    /// Registers the log returned for a workflow run.
    #[must_use]
    pub fn with_run_log(self, run_id: u64, response: Result<String, DigestError>) -> Self {
        self.lock().run_logs.insert(run_id, response);
        self
    }

    /// Returns every call observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Returns the number of REST calls observed so far.
    #[must_use]
    pub fn rest_call_count(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::Rest { .. }))
    }

    /// Returns the number of GraphQL calls observed so far.
    #[must_use]
    pub fn graphql_call_count(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::GraphQl { .. }))
    }

    fn count(&self, predicate: impl Fn(&RecordedCall) -> bool) -> usize {
        self.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn exhausted(operation: &str) -> DigestError {
    DigestError::TransportCall {
        operation: operation.to_owned(),
        message: "no scripted response left".to_owned(),
    }
}

#[async_trait]
impl ForgeTransport for ScriptedTransport {
    async fn call_rest(&self, path: &str) -> Result<Value, DigestError> {
        let mut script = self.lock();
        script.calls.push(RecordedCall::Rest {
            path: path.to_owned(),
        });
        script
            .rest
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("scripted REST call")))
    }

    async fn call_graphql(&self, query: &str, variables: &Value) -> Result<Value, DigestError> {
        let mut script = self.lock();
        script.calls.push(RecordedCall::GraphQl {
            query: query.to_owned(),
            variables: variables.clone(),
        });
        script
            .graphql
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("scripted GraphQL call")))
    }

    async fn run_log(&self, run_id: u64) -> Result<String, DigestError> {
        let mut script = self.lock();
        script.calls.push(RecordedCall::RunLog { run_id });
        script
            .run_logs
            .remove(&run_id)
            .unwrap_or_else(|| Err(exhausted("scripted run log")))
    }
}
