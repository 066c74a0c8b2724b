//! Transport backed by the authenticated `gh` command-line client.

use std::process::{Output, Stdio};

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tokio::process::Command;

use crate::github::error::DigestError;

use super::ForgeTransport;
use super::response::{parse_json, reject_graphql_errors};

const DEFAULT_COMMAND: &str = "gh";
const ACCEPT_HEADER: &str = "Accept: application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version: 2022-11-28";

/// Calls the forge through `gh api` and `gh run view`.
///
/// Credentials are whatever the `gh` installation is logged in with; this
/// transport never reads or stores a token itself.
#[derive(Debug, Clone)]
pub struct GhCliTransport {
    command_path: Utf8PathBuf,
}

impl Default for GhCliTransport {
    fn default() -> Self {
        Self {
            command_path: Utf8PathBuf::from(DEFAULT_COMMAND),
        }
    }
}

impl GhCliTransport {
    /// Creates a transport using the `gh` executable found on `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport using a custom executable path.
    #[must_use]
    pub fn with_command_path(command_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            command_path: command_path.into(),
        }
    }

    /// Executable this transport invokes.
    #[must_use]
    pub fn command_path(&self) -> &Utf8Path {
        &self.command_path
    }

    async fn spawn(&self, operation: &str, args: &[String]) -> Result<Output, DigestError> {
        tracing::debug!(operation, program = %self.command_path, "invoking gh");

        Command::new(self.command_path.as_std_path())
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|error| DigestError::TransportCall {
                operation: operation.to_owned(),
                message: format!("failed to run '{}': {error}", self.command_path),
            })
    }

    async fn run(&self, operation: &str, args: &[String]) -> Result<Vec<u8>, DigestError> {
        let output = self.spawn(operation, args).await?;
        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(self.exit_failure(operation, &output))
        }
    }

    fn exit_failure(&self, operation: &str, output: &Output) -> DigestError {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        let message = if stderr.is_empty() {
            format!("'{}' exited with {}", self.command_path, output.status)
        } else {
            stderr
        };
        DigestError::TransportCall {
            operation: operation.to_owned(),
            message,
        }
    }
}

#[async_trait]
impl ForgeTransport for GhCliTransport {
    async fn call_rest(&self, path: &str) -> Result<Value, DigestError> {
        let operation = "gh API call";
        let stdout = self.run(operation, &rest_args(path)).await?;
        parse_json(operation, &stdout)
    }

    async fn call_graphql(&self, query: &str, variables: &Value) -> Result<Value, DigestError> {
        let operation = "gh GraphQL call";
        let output = self.spawn(operation, &graphql_args(query, variables)).await?;
        if output.status.success() {
            return reject_graphql_errors(parse_json(operation, &output.stdout)?);
        }

        // `gh` exits non-zero when the payload carries `errors` but still
        // prints the payload on stdout.
        match parse_json(operation, &output.stdout).map(reject_graphql_errors) {
            Ok(Err(error @ DigestError::GraphQl { .. })) => Err(error),
            _ => Err(self.exit_failure(operation, &output)),
        }
    }

    async fn run_log(&self, run_id: u64) -> Result<String, DigestError> {
        let stdout = self.run("gh run view", &run_log_args(run_id)).await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

pub(super) fn rest_args(path: &str) -> Vec<String> {
    vec![
        "api".to_owned(),
        "-H".to_owned(),
        ACCEPT_HEADER.to_owned(),
        "-H".to_owned(),
        API_VERSION_HEADER.to_owned(),
        path.to_owned(),
    ]
}

/// Builds `gh api graphql` arguments.
///
/// String variables use `-f` (raw field) and numbers or booleans use `-F`
/// (typed field) so that `Int!` parameters reach the server as integers.
/// Null variables are omitted, which GraphQL treats as an absent optional.
pub(super) fn graphql_args(query: &str, variables: &Value) -> Vec<String> {
    let mut args = vec!["api".to_owned(), "graphql".to_owned()];

    if let Some(fields) = variables.as_object() {
        for (name, value) in fields {
            match value {
                Value::Null => {}
                Value::String(text) => push_field(&mut args, "-f", name, text),
                Value::Number(_) | Value::Bool(_) => {
                    push_field(&mut args, "-F", name, &value.to_string());
                }
                Value::Array(_) | Value::Object(_) => {
                    push_field(&mut args, "-f", name, &value.to_string());
                }
            }
        }
    }

    push_field(&mut args, "-f", "query", query);
    args
}

fn push_field(args: &mut Vec<String>, flag: &str, name: &str, value: &str) {
    args.push(flag.to_owned());
    args.push(format!("{name}={value}"));
}

pub(super) fn run_log_args(run_id: u64) -> Vec<String> {
    vec![
        "run".to_owned(),
        "view".to_owned(),
        run_id.to_string(),
        "--log-failed".to_owned(),
    ]
}
