//! Collection of failed CI checks and their workflow logs.
//!
//! Failed `CheckRun` contexts are read from the status rollup of the pull
//! request's latest commit. Each distinct workflow run has its failed-step
//! log fetched through the transport; a log that cannot be fetched is
//! reported inline rather than failing the digest.

use std::collections::HashSet;

use serde_json::{Value, json};

use super::error::DigestError;
use super::locator::PullRequestLocator;
use super::models::{ApiCheckContext, CiFailure};
use super::transport::ForgeTransport;

const OPERATION: &str = "CI status";
const FAILURE_CONCLUSION: &str = "FAILURE";
const CHECK_RUN_TYPENAME: &str = "CheckRun";
const DEFAULT_CHECK_NAME: &str = "Failed check";
const NO_RUN_ID_MESSAGE: &str = "No workflow run ID available to fetch logs.";
const SUMMARY_MARKER: &str = "short test summary info";
const FAILED_MARKER: &str = "failed";
const SUMMARY_TAIL_LINES: usize = 40;

/// Query for the check contexts of the pull request's latest commit.
pub(crate) const CI_FAILURES_QUERY: &str = r"
query FetchCiFailures($owner: String!, $repo: String!, $pr: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $pr) {
      commits(last: 1) {
        nodes {
          commit {
            statusCheckRollup {
              contexts(first: 100) {
                nodes {
                  __typename
                  ... on CheckRun {
                    name
                    conclusion
                    detailsUrl
                    checkSuite { workflowRun { databaseId url } }
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}
";

/// How much of each failed run's log is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogMode {
    /// Keep the part of the log around the failure summary.
    #[default]
    Summary,
    /// Keep the whole failed-step log.
    Full,
}

/// Collects failed checks on the pull request's latest commit.
///
/// Failures sharing a workflow run are reported once.
///
/// # Errors
///
/// Propagates transport and GraphQL failures from the status query, and
/// returns [`DigestError::UnexpectedResponse`] when the commit list is
/// missing. Log fetch failures are embedded in the result instead.
pub async fn collect_ci_failures<T>(
    transport: &T,
    locator: &PullRequestLocator,
    mode: LogMode,
) -> Result<Vec<CiFailure>, DigestError>
where
    T: ForgeTransport + ?Sized,
{
    let variables = json!({
        "owner": locator.owner().as_str(),
        "repo": locator.repository().as_str(),
        "pr": locator.number().get(),
    });
    let payload = transport.call_graphql(CI_FAILURES_QUERY, &variables).await?;

    let mut seen = HashSet::new();
    let mut failures = Vec::new();
    for context in failed_contexts(payload)? {
        let name = context
            .name
            .unwrap_or_else(|| DEFAULT_CHECK_NAME.to_owned());
        let workflow_run = context.check_suite.and_then(|suite| suite.workflow_run);
        let run_id = workflow_run.as_ref().and_then(|run| run.database_id);
        let details_url = context
            .details_url
            .or_else(|| workflow_run.and_then(|run| run.url));

        let key = run_id.map_or_else(
            || format!("{name}:{}", details_url.as_deref().unwrap_or_default()),
            |id| id.to_string(),
        );
        if !seen.insert(key) {
            continue;
        }

        let raw_log = match run_id {
            Some(id) => transport
                .run_log(id)
                .await
                .unwrap_or_else(|error| format!("Failed to fetch logs for run {id}: {error}")),
            None => NO_RUN_ID_MESSAGE.to_owned(),
        };
        tracing::debug!(check = %name, ?run_id, "collected failed check");

        failures.push(CiFailure {
            name,
            run_id,
            details_url,
            log_excerpt: summarise_log(&raw_log, mode),
        });
    }

    Ok(failures)
}

fn failed_contexts(mut payload: Value) -> Result<Vec<ApiCheckContext>, DigestError> {
    let Some(Value::Array(commits)) = payload
        .pointer_mut("/data/repository/pullRequest/commits/nodes")
        .map(Value::take)
    else {
        return Err(DigestError::unexpected(OPERATION, "response has no commit list"));
    };

    let contexts = commits
        .into_iter()
        .filter_map(|mut commit| {
            match commit
                .pointer_mut("/commit/statusCheckRollup/contexts/nodes")
                .map(Value::take)
            {
                Some(Value::Array(nodes)) => Some(nodes),
                _ => None,
            }
        })
        .flatten()
        .filter_map(|node| match serde_json::from_value::<ApiCheckContext>(node) {
            Ok(context) => Some(context),
            Err(error) => {
                tracing::warn!(%error, "skipping malformed check context");
                None
            }
        })
        .filter(|context| {
            context.typename.as_deref() == Some(CHECK_RUN_TYPENAME)
                && context.conclusion.as_deref() == Some(FAILURE_CONCLUSION)
        })
        .collect();

    Ok(contexts)
}

/// Reduces a failed-step log to its most useful part.
///
/// In [`LogMode::Summary`] the excerpt starts at the first line mentioning
/// the test summary, else the first line mentioning a failure, else it keeps
/// the last 40 lines. Matching is case-insensitive.
///
/// # Example
///
/// ```
/// use prdigest::github::{LogMode, summarise_log};
///
/// let log = "setup ok\nbuild ok\ntest foo FAILED\ncleanup";
/// assert_eq!(summarise_log(log, LogMode::Summary), "test foo FAILED\ncleanup");
/// assert_eq!(summarise_log(log, LogMode::Full), log);
/// ```
#[must_use]
pub fn summarise_log(log: &str, mode: LogMode) -> String {
    if mode == LogMode::Full || log.is_empty() {
        return log.to_owned();
    }

    let lines: Vec<&str> = log.trim().lines().collect();
    let mentions = |marker: &str| {
        lines
            .iter()
            .position(|line| line.to_lowercase().contains(marker))
    };
    let start = mentions(SUMMARY_MARKER)
        .or_else(|| mentions(FAILED_MARKER))
        .unwrap_or_else(|| lines.len().saturating_sub(SUMMARY_TAIL_LINES));

    lines
        .get(start..)
        .unwrap_or_default()
        .join("\n")
        .trim()
        .to_owned()
}
