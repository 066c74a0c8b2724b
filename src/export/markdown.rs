//! Markdown formatter for pull request comment digests.
//!
//! The document is assembled from blocks separated by a blank line: a title,
//! then the general comments, the inline review comments grouped per file,
//! and the failed CI checks. Sections without entries are left out.

use std::io::Write;

use crate::github::{CiFailure, CommentBundle, DigestError, PullRequestLocator, ReviewComment};

use super::ordering::group_by_path;

const NO_COMMENTS: &str = "_No comments found on this PR._";
const NO_LOGS: &str = "_No logs available._";

/// Renders the comments of a pull request as a Markdown document.
///
/// Equivalent to [`render_digest`] without CI failures.
///
/// # Example
///
/// ```
/// use prdigest::{CommentBundle, GeneralComment, PullRequestLocator};
/// use prdigest::export::render_markdown;
///
/// let locator = PullRequestLocator::parse("acme/widgets/pull/42").expect("valid reference");
/// let bundle = CommentBundle {
///     general: vec![GeneralComment { author: "bob".to_owned(), body: "LGTM".to_owned() }],
///     ..CommentBundle::default()
/// };
///
/// let markdown = render_markdown(&bundle, &locator);
/// assert!(markdown.starts_with("# PR Comments: acme/widgets#42\n"));
/// assert!(markdown.contains("### @bob\n\nLGTM"));
/// ```
#[must_use]
pub fn render_markdown(bundle: &CommentBundle, locator: &PullRequestLocator) -> String {
    render_digest(bundle, &[], locator)
}

/// Renders comments and failed CI checks as a Markdown document.
///
/// The output depends only on the arguments, so rendering the same input
/// twice yields identical text.
#[must_use]
pub fn render_digest(
    bundle: &CommentBundle,
    ci_failures: &[CiFailure],
    locator: &PullRequestLocator,
) -> String {
    let mut blocks = vec![format!("# PR Comments: {locator}")];

    if bundle.is_empty() && ci_failures.is_empty() {
        blocks.push(NO_COMMENTS.to_owned());
    }

    if !bundle.general.is_empty() {
        blocks.push("## General PR Comments".to_owned());
        for comment in &bundle.general {
            blocks.push(format!("### @{}", comment.author));
            push_text(&mut blocks, &comment.body);
        }
    }

    if !bundle.review.is_empty() {
        blocks.push("## Inline Code Review Comments".to_owned());
        for (path, comments) in group_by_path(&bundle.review) {
            blocks.push(format!("### File: `{path}`"));
            for comment in comments {
                push_review_comment(&mut blocks, comment);
            }
        }
    }

    if !ci_failures.is_empty() {
        blocks.push("## CI Failures".to_owned());
        for failure in ci_failures {
            push_ci_failure(&mut blocks, failure);
        }
    }

    let mut document = blocks.join("\n\n");
    document.push('\n');
    document
}

/// Writes the rendered digest to the given writer.
///
/// # Errors
///
/// Returns [`DigestError::Io`] if writing to the output fails.
pub fn write_markdown<W: Write>(
    writer: &mut W,
    bundle: &CommentBundle,
    ci_failures: &[CiFailure],
    locator: &PullRequestLocator,
) -> Result<(), DigestError> {
    writer
        .write_all(render_digest(bundle, ci_failures, locator).as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|error| io_error(&error))
}

fn push_review_comment(blocks: &mut Vec<String>, comment: &ReviewComment) {
    blocks.push(format!(
        "#### {} (@{})",
        line_reference(comment),
        comment.author
    ));

    let hunk = comment.diff_hunk.trim_end_matches(['\n', '\r']);
    if !hunk.is_empty() {
        blocks.push("**Code context:**".to_owned());
        blocks.push(fenced_block("diff", hunk));
    }

    blocks.push("**Comment:**".to_owned());
    push_text(blocks, &comment.body);
}

fn push_ci_failure(blocks: &mut Vec<String>, failure: &CiFailure) {
    blocks.push(match failure.run_id {
        Some(run_id) => format!("### {} (Run ID {run_id})", failure.name),
        None => format!("### {}", failure.name),
    });

    if let Some(url) = failure.details_url.as_deref().filter(|url| !url.is_empty()) {
        blocks.push(format!("[Details]({url})"));
    }

    let log = failure.log_excerpt.trim_end();
    if log.is_empty() {
        blocks.push(NO_LOGS.to_owned());
    } else {
        blocks.push(fenced_block("", log));
    }
}

/// Pushes a comment body, skipping it when nothing but whitespace remains.
fn push_text(blocks: &mut Vec<String>, body: &str) {
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        blocks.push(trimmed.to_owned());
    }
}

/// Formats the heading label for a review comment's position.
fn line_reference(comment: &ReviewComment) -> String {
    match (comment.start_line, comment.line) {
        (Some(start), Some(end)) if start != end => format!("Lines {start}-{end}"),
        (_, Some(line)) => format!("Line {line}"),
        (_, None) => "Outdated comment, no current line".to_owned(),
    }
}

/// Wraps content in a fence longer than any backtick run it contains.
fn fenced_block(language: &str, content: &str) -> String {
    let fence = compute_fence(content);
    format!("{fence}{language}\n{content}\n{fence}")
}

/// Computes a fence string that exceeds any backtick run in the content.
fn compute_fence(content: &str) -> String {
    let max_backticks = content.split(|c| c != '`').map(str::len).max().unwrap_or(0);
    let fence_len = max_backticks.max(2) + 1;
    "`".repeat(fence_len)
}

/// Converts an I/O error to a [`DigestError::Io`].
fn io_error(error: &std::io::Error) -> DigestError {
    DigestError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
