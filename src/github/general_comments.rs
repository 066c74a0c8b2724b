//! Retrieval of top-level pull request comments over REST.
//!
//! The forge stores these as issue comments. Pages are requested by number
//! and a short page ends the fetch, so most pull requests take one call.

use serde_json::Value;

use super::error::DigestError;
use super::locator::PullRequestLocator;
use super::models::{ApiIssueComment, GeneralComment};
use super::options::FetchOptions;
use super::pagination::PageBudget;
use super::transport::ForgeTransport;

const OPERATION: &str = "issue comments";

/// Entries requested per REST page; the forge's maximum.
pub(crate) const ISSUE_COMMENTS_PER_PAGE: usize = 100;

/// Outcome of a general comment fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralFetch {
    /// Comments in arrival order.
    pub comments: Vec<GeneralComment>,
    /// Malformed entries that were dropped.
    pub skipped: usize,
}

/// Fetches every top-level comment on a pull request.
///
/// REST pages carry no continuation flag, so a full page at the bound is
/// treated as more to come and fails even if the next page would have been
/// empty.
///
/// # Errors
///
/// Propagates transport failures. Returns
/// [`DigestError::UnexpectedResponse`] when a page is not a JSON array and
/// [`DigestError::PaginationBoundExceeded`] when full pages keep arriving
/// after `max_pages` requests.
pub async fn fetch_general_comments<T>(
    transport: &T,
    locator: &PullRequestLocator,
    options: FetchOptions,
) -> Result<GeneralFetch, DigestError>
where
    T: ForgeTransport + ?Sized,
{
    let mut fetch = GeneralFetch::default();
    let mut budget = PageBudget::new(OPERATION, options.max_pages());
    let mut page: u32 = 1;

    loop {
        budget.ensure_more_allowed()?;
        let path = locator.issue_comments_path(ISSUE_COMMENTS_PER_PAGE, page);
        let payload = transport.call_rest(&path).await?;
        budget.record_page();

        let Value::Array(entries) = payload else {
            return Err(DigestError::unexpected(
                OPERATION,
                "expected a JSON array of comments",
            ));
        };
        let entry_count = entries.len();
        tracing::debug!(page, entries = entry_count, "fetched issue comment page");

        for entry in entries {
            let comment = serde_json::from_value::<ApiIssueComment>(entry)
                .ok()
                .and_then(ApiIssueComment::into_general);
            if let Some(comment) = comment {
                fetch.comments.push(comment);
            } else {
                tracing::warn!(page, "skipping malformed issue comment");
                fetch.skipped = fetch.skipped.saturating_add(1);
            }
        }

        if entry_count < ISSUE_COMMENTS_PER_PAGE {
            return Ok(fetch);
        }
        page = page.saturating_add(1);
    }
}
