//! Pull request comment digests for coding agents.
//!
//! The library parses pull request references, fetches general comments,
//! inline review comments and failed CI checks through the authenticated
//! `gh` CLI, and renders them as a single Markdown document. Failures are
//! surfaced as typed [`DigestError`] values so that an incomplete fetch is
//! never mistaken for a pull request without feedback.

pub mod config;
pub mod export;
pub mod github;
pub mod telemetry;

pub use config::PrDigestConfig;
pub use export::{render_digest, render_markdown};
pub use github::{
    CiFailure, CommentBundle, CommentIntake, DigestError, FetchOptions, ForgeTransport,
    GeneralComment, GhCliTransport, LogMode, PullRequestLocator, ReviewComment,
};
