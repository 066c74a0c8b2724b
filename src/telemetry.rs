//! Telemetry events and sinks.
//!
//! Events describe what a digest run fetched, including how many malformed
//! entries were dropped, so that upstream schema drift shows up as a
//! non-zero skip count instead of silently shorter output.

use std::io;

use serde::{Deserialize, Serialize};

use crate::github::CommentBundle;

/// A structured telemetry event emitted by prdigest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the outcome of fetching one pull request's comments.
    DigestFetched {
        /// General comments kept.
        general_comments: usize,
        /// Review comments kept.
        review_comments: usize,
        /// Malformed general comments dropped.
        skipped_general: usize,
        /// Malformed review comments dropped.
        skipped_review: usize,
        /// GraphQL pages requested for review comments.
        review_pages: u32,
    },
}

impl TelemetryEvent {
    /// Summarises a fetched comment bundle.
    #[must_use]
    pub fn digest_fetched(bundle: &CommentBundle) -> Self {
        Self::DigestFetched {
            general_comments: bundle.general.len(),
            review_comments: bundle.review.len(),
            skipped_general: bundle.skipped.general,
            skipped_review: bundle.skipped.review,
            review_pages: bundle.review_pages,
        }
    }
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
