//! Shared test utilities for export tests.
//!
//! This module provides builders and assertions used by the renderer's unit
//! tests and by the integration scenarios.

use crate::github::{CiFailure, GeneralComment, ReviewComment};

/// Test data constants to reduce string argument repetition.
pub mod test_data {
    /// Reference used by most rendering tests.
    pub const SAMPLE_REFERENCE: &str = "acme/widgets/pull/42";
    /// Title line rendered for [`SAMPLE_REFERENCE`].
    pub const SAMPLE_TITLE: &str = "# PR Comments: acme/widgets#42";
    /// Sample author name.
    pub const SAMPLE_AUTHOR: &str = "alice";
    /// Sample file path.
    pub const SAMPLE_FILE_PATH: &str = "src/lib.rs";
    /// Sample comment body.
    pub const SAMPLE_BODY: &str = "Consider using a constant here.";
    /// Sample diff hunk.
    pub const SAMPLE_DIFF_HUNK: &str = "@@ -40,3 +40,5 @@\n let x = 1;";
}

/// Builds a [`GeneralComment`].
#[must_use]
pub fn general_comment(author: &str, body: &str) -> GeneralComment {
    GeneralComment {
        author: author.to_owned(),
        body: body.to_owned(),
    }
}

/// Builder for creating test [`ReviewComment`] instances with a fluent API.
#[must_use]
pub struct ReviewCommentBuilder {
    comment: ReviewComment,
}

impl ReviewCommentBuilder {
    /// Creates a new builder for a comment on the given path.
    pub fn new(path: &str) -> Self {
        Self {
            comment: ReviewComment {
                author: test_data::SAMPLE_AUTHOR.to_owned(),
                path: path.to_owned(),
                ..ReviewComment::default()
            },
        }
    }

    /// Sets the comment author.
    pub fn author(mut self, author: &str) -> Self {
        author.clone_into(&mut self.comment.author);
        self
    }

    /// Sets the current line.
    pub const fn line(mut self, line: u32) -> Self {
        self.comment.line = Some(line);
        self
    }

    /// Sets the first line of a range.
    pub const fn start_line(mut self, start_line: u32) -> Self {
        self.comment.start_line = Some(start_line);
        self
    }

    /// Sets the comment body.
    pub fn body(mut self, body: &str) -> Self {
        body.clone_into(&mut self.comment.body);
        self
    }

    /// Sets the diff hunk.
    pub fn diff_hunk(mut self, diff_hunk: &str) -> Self {
        diff_hunk.clone_into(&mut self.comment.diff_hunk);
        self
    }

    /// Builds the [`ReviewComment`] with configured values.
    #[must_use]
    pub fn build(self) -> ReviewComment {
        self.comment
    }
}

/// Builds a [`CiFailure`].
#[must_use]
pub fn ci_failure(name: &str, run_id: Option<u64>, log_excerpt: &str) -> CiFailure {
    CiFailure {
        name: name.to_owned(),
        run_id,
        details_url: None,
        log_excerpt: log_excerpt.to_owned(),
    }
}

/// Asserts that `haystack` contains `needle`, returning an error if not.
///
/// # Errors
///
/// Returns a message showing the full output when `needle` is absent.
pub fn assert_contains(haystack: &str, needle: &str) -> Result<(), String> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(format!(
            "expected output to contain '{needle}', got:\n{haystack}"
        ))
    }
}

/// Asserts that `haystack` does NOT contain `needle`, returning an error if it does.
///
/// # Errors
///
/// Returns a message showing the full output when `needle` is present.
pub fn assert_not_contains(haystack: &str, needle: &str) -> Result<(), String> {
    if haystack.contains(needle) {
        Err(format!(
            "expected output to NOT contain '{needle}', got:\n{haystack}"
        ))
    } else {
        Ok(())
    }
}
