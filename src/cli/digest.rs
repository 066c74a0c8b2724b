//! Digest operation: fetch, render and write one pull request's discussion.

use prdigest::github::ForgeTransport;
use prdigest::telemetry::{
    NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink,
};
use prdigest::{CommentIntake, DigestError, GhCliTransport, PrDigestConfig, PullRequestLocator};

use super::output::write_document;

/// Renders the digest for the configured pull request.
///
/// # Errors
///
/// Returns an error if:
/// - The pull request reference is missing or malformed
/// - A `gh` call fails or returns an unexpected response
/// - Pagination exceeds the configured page bound
/// - Writing the output fails
pub async fn run(config: &PrDigestConfig) -> Result<(), DigestError> {
    let locator = config.locator()?;
    let transport = GhCliTransport::with_command_path(config.gh_path.as_str());
    let sink: &dyn TelemetrySink = if config.telemetry {
        &StderrJsonlTelemetrySink
    } else {
        &NoopTelemetrySink
    };

    let document = build_digest(&transport, &locator, config, sink).await?;
    write_document(config.output.as_deref(), &document)
}

/// Fetches comments and CI failures and renders them as Markdown.
pub(crate) async fn build_digest<T>(
    transport: &T,
    locator: &PullRequestLocator,
    config: &PrDigestConfig,
    sink: &dyn TelemetrySink,
) -> Result<String, DigestError>
where
    T: ForgeTransport + ?Sized,
{
    let intake = CommentIntake::new(transport).with_options(config.fetch_options());
    let bundle = intake.load(locator).await?;

    sink.record(TelemetryEvent::digest_fetched(&bundle));
    if bundle.skipped.total() > 0 {
        tracing::warn!(
            skipped_general = bundle.skipped.general,
            skipped_review = bundle.skipped.review,
            "dropped malformed comment entries"
        );
    }

    let ci_failures = if config.skip_ci_failures {
        Vec::new()
    } else {
        intake.load_ci_failures(locator, config.log_mode()).await?
    };

    Ok(prdigest::render_digest(&bundle, &ci_failures, locator))
}
