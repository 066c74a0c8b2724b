//! Paginated retrieval of inline review comments over GraphQL.
//!
//! Review threads are fetched a page at a time, following `endCursor` while
//! the forge reports `hasNextPage`. Threads with more comments than fit in
//! the embedded connection are completed with a follow-up `node(id:)`
//! query. Both loops draw on one page budget, so `max_pages` caps the total
//! number of GraphQL calls made for review comments.

use serde_json::{Value, json};

use super::error::DigestError;
use super::locator::PullRequestLocator;
use super::models::{ApiConnection, ApiReviewComment, ApiReviewThread, ReviewComment, ThreadAnchor};
use super::options::FetchOptions;
use super::pagination::PageBudget;
use super::transport::ForgeTransport;

const THREADS_OPERATION: &str = "review threads";
const THREAD_COMMENTS_OPERATION: &str = "review thread comments";

/// Query for one page of review threads with their first page of comments.
pub(crate) const REVIEW_THREADS_QUERY: &str = r"
query FetchReviewThreads($owner: String!, $repo: String!, $pr: Int!, $after: String) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $pr) {
      reviewThreads(first: 100, after: $after) {
        pageInfo { hasNextPage endCursor }
        nodes {
          id
          isResolved
          path
          line
          startLine
          comments(first: 100) {
            pageInfo { hasNextPage endCursor }
            nodes { author { login } body diffHunk }
          }
        }
      }
    }
  }
}
";

/// Query for a further page of comments within one review thread.
pub(crate) const THREAD_COMMENTS_QUERY: &str = r"
query FetchThreadComments($thread: ID!, $after: String) {
  node(id: $thread) {
    ... on PullRequestReviewThread {
      comments(first: 100, after: $after) {
        pageInfo { hasNextPage endCursor }
        nodes { author { login } body diffHunk }
      }
    }
  }
}
";

/// Outcome of a review comment fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFetch {
    /// Comments in fetch order.
    pub comments: Vec<ReviewComment>,
    /// Malformed entries that were dropped.
    pub skipped: usize,
    /// GraphQL pages requested, including thread follow-ups.
    pub pages: u32,
}

impl ReviewFetch {
    fn skip(&mut self, reason: &str) {
        tracing::warn!(reason, "skipping malformed review comment");
        self.skipped = self.skipped.saturating_add(1);
    }

    /// Appends each well-formed comment node, skipping the rest.
    fn collect(&mut self, nodes: Vec<Value>, anchor: &ThreadAnchor) {
        for node in nodes {
            let decoded = serde_json::from_value::<ApiReviewComment>(node);
            match decoded.map(|comment| comment.into_review(anchor)) {
                Ok(Some(comment)) => self.comments.push(comment),
                Ok(None) => self.skip("comment has no body"),
                Err(_) => self.skip("comment node has an unexpected shape"),
            }
        }
    }
}

/// Fetches every inline review comment on a pull request.
///
/// Resolved threads are left out unless
/// [`FetchOptions::include_resolved`] is set.
///
/// # Errors
///
/// Propagates transport and GraphQL failures. Returns
/// [`DigestError::UnexpectedResponse`] when the thread connection is missing
/// and [`DigestError::PaginationBoundExceeded`] when the forge still reports
/// more pages after `max_pages` requests, counting thread follow-ups.
pub async fn fetch_review_comments<T>(
    transport: &T,
    locator: &PullRequestLocator,
    options: FetchOptions,
) -> Result<ReviewFetch, DigestError>
where
    T: ForgeTransport + ?Sized,
{
    let mut fetch = ReviewFetch::default();
    let mut budget = PageBudget::new(THREADS_OPERATION, options.max_pages());
    let mut after: Option<String> = None;

    loop {
        budget.ensure_more_allowed()?;
        let variables = json!({
            "owner": locator.owner().as_str(),
            "repo": locator.repository().as_str(),
            "pr": locator.number().get(),
            "after": after,
        });
        let payload = transport
            .call_graphql(REVIEW_THREADS_QUERY, &variables)
            .await?;
        budget.record_page();
        fetch.pages = fetch.pages.saturating_add(1);

        let connection = connection_at(
            payload,
            "/data/repository/pullRequest/reviewThreads",
            THREADS_OPERATION,
        )?;
        tracing::debug!(
            page = budget.fetched(),
            threads = connection.nodes.len(),
            "fetched review thread page"
        );

        for node in connection.nodes {
            collect_thread(transport, node, options, &mut budget, &mut fetch).await?;
        }

        match connection.page_info.into_cursor().into_next(THREADS_OPERATION)? {
            Some(cursor) => after = Some(cursor),
            None => break,
        }
    }

    Ok(fetch)
}

async fn collect_thread<T>(
    transport: &T,
    node: Value,
    options: FetchOptions,
    budget: &mut PageBudget,
    fetch: &mut ReviewFetch,
) -> Result<(), DigestError>
where
    T: ForgeTransport + ?Sized,
{
    let Ok(thread) = serde_json::from_value::<ApiReviewThread>(node) else {
        fetch.skip("review thread has an unexpected shape");
        return Ok(());
    };
    if thread.is_resolved && !options.include_resolved() {
        return Ok(());
    }

    let comments = thread.comments.unwrap_or_default();
    let Some(path) = thread.path else {
        for _ in &comments.nodes {
            fetch.skip("review thread has no path");
        }
        return Ok(());
    };
    let anchor = ThreadAnchor {
        path,
        line: thread.line,
        start_line: thread.start_line,
    };

    fetch.collect(comments.nodes, &anchor);

    let Some(cursor) = comments
        .page_info
        .into_cursor()
        .into_next(THREAD_COMMENTS_OPERATION)?
    else {
        return Ok(());
    };
    let thread_id = thread.id.ok_or_else(|| {
        DigestError::unexpected(
            THREAD_COMMENTS_OPERATION,
            "thread reports more comments but has no id",
        )
    })?;

    fetch_remaining_comments(transport, &thread_id, cursor, &anchor, budget, fetch).await
}

async fn fetch_remaining_comments<T>(
    transport: &T,
    thread_id: &str,
    cursor: String,
    anchor: &ThreadAnchor,
    budget: &mut PageBudget,
    fetch: &mut ReviewFetch,
) -> Result<(), DigestError>
where
    T: ForgeTransport + ?Sized,
{
    let mut after = cursor;

    loop {
        budget.ensure_more_allowed()?;
        let variables = json!({ "thread": thread_id, "after": after });
        let payload = transport
            .call_graphql(THREAD_COMMENTS_QUERY, &variables)
            .await?;
        budget.record_page();
        fetch.pages = fetch.pages.saturating_add(1);

        let connection = connection_at(payload, "/data/node/comments", THREAD_COMMENTS_OPERATION)?;
        tracing::debug!(
            thread = thread_id,
            page = budget.fetched(),
            comments = connection.nodes.len(),
            "fetched review thread comment page"
        );
        fetch.collect(connection.nodes, anchor);

        match connection
            .page_info
            .into_cursor()
            .into_next(THREAD_COMMENTS_OPERATION)?
        {
            Some(next) => after = next,
            None => return Ok(()),
        }
    }
}

/// Decodes the connection at `pointer`, failing when it is absent.
fn connection_at(
    mut payload: Value,
    pointer: &str,
    operation: &str,
) -> Result<ApiConnection, DigestError> {
    let value = payload
        .pointer_mut(pointer)
        .map(Value::take)
        .filter(|value| !value.is_null())
        .ok_or_else(|| DigestError::unexpected(operation, format!("response has no {pointer}")))?;

    serde_json::from_value(value).map_err(|error| {
        DigestError::unexpected(operation, format!("malformed connection at {pointer}: {error}"))
    })
}

#[cfg(test)]
#[path = "review_comments_tests.rs"]
mod tests;
