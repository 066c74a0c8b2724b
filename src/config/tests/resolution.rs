//! Tests for reference, fetch option and log mode resolution.

use rstest::rstest;

use crate::PrDigestConfig;
use crate::github::{DigestError, LogMode};

#[rstest]
fn locator_prefers_reference_over_parts() {
    let config = PrDigestConfig {
        pr: Some("acme/widgets/pull/42".to_owned()),
        owner: Some("other".to_owned()),
        repo: Some("thing".to_owned()),
        number: Some(1),
        ..Default::default()
    };

    let locator = config.locator().expect("reference should resolve");

    assert_eq!(locator.to_string(), "acme/widgets#42");
}

#[rstest]
fn locator_uses_discrete_parts() {
    let config = PrDigestConfig {
        owner: Some("acme".to_owned()),
        repo: Some("widgets".to_owned()),
        number: Some(9),
        ..Default::default()
    };

    let locator = config.locator().expect("parts should resolve");

    assert_eq!(locator.to_string(), "acme/widgets#9");
}

#[rstest]
fn locator_without_any_reference_fails() {
    let result = PrDigestConfig::default().locator();

    assert!(
        matches!(result, Err(DigestError::InvalidReference { .. })),
        "expected InvalidReference, got {result:?}"
    );
}

#[rstest]
fn fetch_options_mirror_config() {
    let config = PrDigestConfig {
        max_pages: 7,
        include_resolved: true,
        ..Default::default()
    };

    let options = config.fetch_options();

    assert_eq!(options.max_pages(), 7);
    assert!(options.include_resolved());
}

#[rstest]
#[case::summary_by_default(false, LogMode::Summary)]
#[case::full_on_request(true, LogMode::Full)]
fn log_mode_follows_full_ci_logs(#[case] full_ci_logs: bool, #[case] expected: LogMode) {
    let config = PrDigestConfig {
        full_ci_logs,
        ..Default::default()
    };

    assert_eq!(config.log_mode(), expected);
}
