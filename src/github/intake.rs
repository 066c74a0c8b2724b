//! High-level intake facade used by the CLI.

use super::ci_failures::{LogMode, collect_ci_failures};
use super::error::DigestError;
use super::general_comments::fetch_general_comments;
use super::locator::PullRequestLocator;
use super::models::{CiFailure, CommentBundle, SkippedEntries};
use super::options::FetchOptions;
use super::review_comments::fetch_review_comments;
use super::transport::ForgeTransport;

/// Aggregates general and review comments using a transport.
pub struct CommentIntake<'client, Transport>
where
    Transport: ForgeTransport + ?Sized,
{
    transport: &'client Transport,
    options: FetchOptions,
}

impl<'client, Transport> CommentIntake<'client, Transport>
where
    Transport: ForgeTransport + ?Sized,
{
    /// Create a new intake facade with default fetch options.
    #[must_use]
    pub fn new(transport: &'client Transport) -> Self {
        Self {
            transport,
            options: FetchOptions::default(),
        }
    }

    /// Replace the fetch options.
    #[must_use]
    pub const fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Load both comment domains for the target pull request.
    ///
    /// The two fetches run concurrently. If either fails, the whole load
    /// fails with that error and no partial bundle is returned.
    ///
    /// # Errors
    ///
    /// Propagates any failure from either fetcher.
    pub async fn load(&self, locator: &PullRequestLocator) -> Result<CommentBundle, DigestError> {
        let (general, review) = tokio::try_join!(
            fetch_general_comments(self.transport, locator, self.options),
            fetch_review_comments(self.transport, locator, self.options),
        )?;

        tracing::debug!(
            %locator,
            general = general.comments.len(),
            review = review.comments.len(),
            pages = review.pages,
            "loaded pull request comments"
        );

        Ok(CommentBundle {
            general: general.comments,
            review: review.comments,
            skipped: SkippedEntries {
                general: general.skipped,
                review: review.skipped,
            },
            review_pages: review.pages,
        })
    }

    /// Load failed CI checks for the pull request's latest commit.
    ///
    /// # Errors
    ///
    /// Propagates failures of the status query; individual log fetch
    /// failures are embedded in the returned records.
    pub async fn load_ci_failures(
        &self,
        locator: &PullRequestLocator,
        mode: LogMode,
    ) -> Result<Vec<CiFailure>, DigestError> {
        collect_ci_failures(self.transport, locator, mode).await
    }
}
