//! Pull request comment retrieval through the `gh` CLI.
//!
//! This module parses pull request references, talks to the forge through
//! the [`ForgeTransport`] seam, and gathers general comments, inline review
//! comments and failed CI checks into plain records for rendering. Errors
//! are typed [`DigestError`] variants so that callers can tell a bad
//! reference from a transport failure or an incomplete fetch.

pub mod ci_failures;
pub mod error;
pub mod general_comments;
pub mod intake;
pub mod locator;
pub mod models;
pub mod options;
pub mod pagination;
pub mod review_comments;
pub mod transport;

pub use ci_failures::{LogMode, collect_ci_failures, summarise_log};
pub use error::DigestError;
pub use general_comments::{GeneralFetch, fetch_general_comments};
pub use intake::CommentIntake;
pub use locator::{PullRequestLocator, PullRequestNumber, RepositoryName, RepositoryOwner};
pub use models::{CiFailure, CommentBundle, GeneralComment, ReviewComment, SkippedEntries};
pub use options::FetchOptions;
pub use review_comments::{ReviewFetch, fetch_review_comments};
pub use transport::{ForgeTransport, GhCliTransport};

#[cfg(test)]
pub use transport::MockForgeTransport;

#[cfg(test)]
mod tests;
