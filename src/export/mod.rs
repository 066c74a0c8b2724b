//! Markdown digest rendering.
//!
//! This module turns a [`CommentBundle`](crate::github::CommentBundle) and
//! any failed CI checks into a single Markdown document suitable for coding
//! agents and human reviewers.
//!
//! # Layout
//!
//! - A title naming the pull request.
//! - General comments in arrival order.
//! - Inline review comments grouped by file in order of first appearance,
//!   then by line (ascending, outdated comments last).
//! - Failed CI checks with their log excerpts.
//!
//! Empty sections are omitted. The only identity rendered is the author
//! login.

mod markdown;
mod ordering;
#[doc(hidden)]
pub mod test_helpers;

pub use markdown::{render_digest, render_markdown, write_markdown};
