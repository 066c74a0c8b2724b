//! Scenario state for the pull request comment digest BDD tests.

use prdigest::DigestError;
use prdigest::github::transport::test_support::RecordedCall;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::Value;

/// Scenario state for digest tests.
#[derive(ScenarioState, Default)]
pub(crate) struct DigestState {
    /// REST issue comment entries served for the first page.
    pub(crate) general: Slot<Vec<Value>>,
    /// Review thread nodes served on a single GraphQL page.
    pub(crate) threads: Slot<Vec<Value>>,
    /// Complete GraphQL pages, used instead of `threads` when set.
    pub(crate) pages: Slot<Vec<Value>>,
    /// Rendered Markdown document.
    pub(crate) digest: Slot<String>,
    /// Error returned by the digest run.
    pub(crate) error: Slot<DigestError>,
    /// Calls observed by the scripted transport.
    pub(crate) calls: Slot<Vec<RecordedCall>>,
}

impl DigestState {
    /// Appends a value to a list-valued slot.
    pub(crate) fn push(slot: &Slot<Vec<Value>>, value: Value) {
        let mut values = slot.take().unwrap_or_default();
        values.push(value);
        slot.set(values);
    }
}
