//! Data models representing pull request comments and CI failures.
//!
//! Public types are the domain records consumed by the renderer. Types
//! prefixed with `Api` are internal deserialisation targets for forge
//! payloads; they are decoded one entry at a time so that a single malformed
//! entry can be skipped without discarding its neighbours.

use serde::Deserialize;
use serde_json::Value;

use super::pagination::PageCursor;

const UNKNOWN_AUTHOR: &str = "unknown";

/// Top-level pull request comment, not anchored to a diff line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralComment {
    /// Author login.
    pub author: String,
    /// Comment body.
    pub body: String,
}

/// Inline review comment anchored to a file in the pull request diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewComment {
    /// Author login.
    pub author: String,
    /// Comment body.
    pub body: String,
    /// File path the comment is attached to.
    pub path: String,
    /// Current line the comment refers to, absent when the diff is outdated.
    pub line: Option<u32>,
    /// First line of a multi-line comment range.
    pub start_line: Option<u32>,
    /// Diff hunk context for this comment.
    pub diff_hunk: String,
}

/// Number of malformed entries dropped while fetching each comment domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedEntries {
    /// General comments skipped.
    pub general: usize,
    /// Review comments skipped.
    pub review: usize,
}

impl SkippedEntries {
    /// Total number of skipped entries across both domains.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.general.saturating_add(self.review)
    }
}

/// All discussion fetched for one pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBundle {
    /// General comments in arrival order.
    pub general: Vec<GeneralComment>,
    /// Review comments in fetch order.
    pub review: Vec<ReviewComment>,
    /// Malformed entries that were dropped.
    pub skipped: SkippedEntries,
    /// GraphQL pages requested while fetching review comments.
    pub review_pages: u32,
}

impl CommentBundle {
    /// Returns true when neither domain holds a comment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.review.is_empty()
    }
}

/// A failed CI check on the pull request's latest commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiFailure {
    /// Check run name.
    pub name: String,
    /// GitHub Actions workflow run identifier, when known.
    pub run_id: Option<u64>,
    /// Link to the check run details page.
    pub details_url: Option<String>,
    /// Log output, summarised unless full logs were requested.
    pub log_excerpt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

/// REST issue comment entry.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiIssueComment {
    pub(super) body: Option<String>,
    pub(super) user: Option<ApiUser>,
}

/// GraphQL connection page information.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiPageInfo {
    #[serde(default)]
    pub(super) has_next_page: bool,
    pub(super) end_cursor: Option<String>,
}

/// GraphQL connection with undecoded nodes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiConnection {
    #[serde(default)]
    pub(super) page_info: ApiPageInfo,
    #[serde(default)]
    pub(super) nodes: Vec<Value>,
}

/// GraphQL review thread node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiReviewThread {
    pub(super) id: Option<String>,
    #[serde(default)]
    pub(super) is_resolved: bool,
    pub(super) path: Option<String>,
    pub(super) line: Option<u32>,
    pub(super) start_line: Option<u32>,
    pub(super) comments: Option<ApiConnection>,
}

/// GraphQL review comment node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiReviewComment {
    pub(super) author: Option<ApiUser>,
    pub(super) body: Option<String>,
    pub(super) diff_hunk: Option<String>,
}

/// GraphQL status check context node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiCheckContext {
    #[serde(rename = "__typename")]
    pub(super) typename: Option<String>,
    pub(super) name: Option<String>,
    pub(super) conclusion: Option<String>,
    pub(super) details_url: Option<String>,
    pub(super) check_suite: Option<ApiCheckSuite>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiCheckSuite {
    pub(super) workflow_run: Option<ApiWorkflowRun>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiWorkflowRun {
    pub(super) database_id: Option<u64>,
    pub(super) url: Option<String>,
}

impl ApiPageInfo {
    pub(super) fn into_cursor(self) -> PageCursor {
        PageCursor::new(self.end_cursor, self.has_next_page)
    }
}

fn author_login(user: Option<ApiUser>) -> String {
    user.and_then(|value| value.login)
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_owned())
}

impl ApiIssueComment {
    /// Converts into a domain comment, or `None` when the body is absent.
    pub(super) fn into_general(self) -> Option<GeneralComment> {
        let body = self.body?;
        Some(GeneralComment {
            author: author_login(self.user),
            body,
        })
    }
}

/// Location shared by every comment in a review thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ThreadAnchor {
    pub(super) path: String,
    pub(super) line: Option<u32>,
    pub(super) start_line: Option<u32>,
}

impl ApiReviewComment {
    /// Converts into a domain comment, or `None` when the body is absent.
    pub(super) fn into_review(self, anchor: &ThreadAnchor) -> Option<ReviewComment> {
        let body = self.body?;
        Some(ReviewComment {
            author: author_login(self.author),
            body,
            path: anchor.path.clone(),
            line: anchor.line,
            start_line: anchor.start_line,
            diff_hunk: self.diff_hunk.unwrap_or_default(),
        })
    }
}
