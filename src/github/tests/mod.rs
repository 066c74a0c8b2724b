//! Unit tests for reference parsing and the comment intake facade.

use mockall::predicate::always;
use rstest::rstest;
use serde_json::json;

use super::{
    CommentIntake, DigestError, FetchOptions, LogMode, MockForgeTransport, PullRequestLocator,
    PullRequestNumber, RepositoryName, RepositoryOwner, SkippedEntries,
};


fn sample_locator() -> PullRequestLocator {
    PullRequestLocator::parse("octo/repo/pull/4").expect("sample locator should parse")
}

fn empty_threads() -> serde_json::Value {
    json!({
        "data": { "repository": { "pullRequest": { "reviewThreads": {
            "pageInfo": { "hasNextPage": false, "endCursor": null },
            "nodes": []
        }}}}
    })
}

#[rstest]
fn rejects_zero_number() {
    let result = PullRequestNumber::new(0);
    assert!(
        matches!(result, Err(DigestError::InvalidReference { .. })),
        "expected InvalidReference for zero, got {result:?}"
    );
}

#[rstest]
#[case::largest(2_147_483_647, true)]
#[case::one_past_largest(2_147_483_648, false)]
#[case::u64_max(u64::MAX, false)]
fn numbers_are_bounded_by_graphql_int(#[case] value: u64, #[case] accepted: bool) {
    let result = PullRequestLocator::from_parts("acme", "widgets", value);
    if accepted {
        assert_eq!(result.map(|locator| locator.number().get()), Ok(value));
    } else {
        assert!(
            matches!(result, Err(DigestError::InvalidReference { .. })),
            "expected InvalidReference for {value}, got {result:?}"
        );
    }
}

#[rstest]
#[case::leading_hyphen("-octo")]
#[case::trailing_hyphen("octo-")]
#[case::double_hyphen("oc--to")]
#[case::underscore("oc_to")]
#[case::too_long("a123456789b123456789c123456789d123456789")]
fn rejects_invalid_owner(#[case] owner: &str) {
    assert!(RepositoryOwner::new(owner).is_err(), "owner {owner} should be rejected");
}

#[rstest]
#[case::dot(".")]
#[case::dot_dot("..")]
#[case::space("my repo")]
#[case::empty("")]
fn rejects_invalid_repository(#[case] name: &str) {
    assert!(RepositoryName::new(name).is_err(), "name {name:?} should be rejected");
}

#[rstest]
#[case::dotted("widgets.rs")]
#[case::underscored("my_repo")]
#[case::hyphenated("my-repo")]
fn accepts_repository_punctuation(#[case] name: &str) {
    let parsed = RepositoryName::new(name).expect("name should be accepted");
    assert_eq!(parsed.as_str(), name);
}

#[tokio::test]
async fn aggregates_both_comment_domains() {
    let locator = sample_locator();
    let mut transport = MockForgeTransport::new();
    transport
        .expect_call_rest()
        .with(always())
        .times(1)
        .returning(|_| {
            Ok(json!([
                { "user": { "login": "a" }, "body": "first" },
                { "user": { "login": "b" }, "body": null }
            ]))
        });
    transport
        .expect_call_graphql()
        .with(always(), always())
        .times(1)
        .returning(|_, _| {
            Ok(json!({
                "data": { "repository": { "pullRequest": { "reviewThreads": {
                    "pageInfo": { "hasNextPage": false, "endCursor": null },
                    "nodes": [{
                        "id": "T1",
                        "isResolved": false,
                        "path": "src/lib.rs",
                        "line": 3,
                        "comments": { "nodes": [
                            { "author": { "login": "c" }, "body": "inline", "diffHunk": "" }
                        ]}
                    }]
                }}}}
            }))
        });

    let bundle = CommentIntake::new(&transport)
        .load(&locator)
        .await
        .expect("intake should succeed");

    assert_eq!(bundle.general.len(), 1);
    assert_eq!(bundle.review.len(), 1);
    assert_eq!(bundle.review_pages, 1);
    assert_eq!(
        bundle.skipped,
        SkippedEntries {
            general: 1,
            review: 0,
        }
    );
}

#[rstest]
#[case::general_fails(true)]
#[case::review_fails(false)]
#[tokio::test]
async fn any_failure_fails_the_whole_load(#[case] general_fails: bool) {
    let locator = sample_locator();
    let failure = DigestError::TransportCall {
        operation: "gh API call".to_owned(),
        message: "HTTP 500".to_owned(),
    };
    let mut transport = MockForgeTransport::new();

    let rest_failure = failure.clone();
    transport.expect_call_rest().returning(move |_| {
        if general_fails {
            Err(rest_failure.clone())
        } else {
            Ok(json!([]))
        }
    });
    let graphql_failure = failure.clone();
    transport.expect_call_graphql().returning(move |_, _| {
        if general_fails {
            Ok(empty_threads())
        } else {
            Err(graphql_failure.clone())
        }
    });

    let result = CommentIntake::new(&transport).load(&locator).await;

    assert_eq!(result, Err(failure));
}

#[tokio::test]
async fn options_reach_the_fetchers() {
    let locator = sample_locator();
    let mut transport = MockForgeTransport::new();
    transport.expect_call_rest().returning(|_| Ok(json!([])));
    transport.expect_call_graphql().times(1).returning(|_, _| {
        Ok(json!({
            "data": { "repository": { "pullRequest": { "reviewThreads": {
                "pageInfo": { "hasNextPage": true, "endCursor": "more" },
                "nodes": []
            }}}}
        }))
    });

    let result = CommentIntake::new(&transport)
        .with_options(FetchOptions::default().with_max_pages(1))
        .load(&locator)
        .await;

    assert!(
        matches!(result, Err(DigestError::PaginationBoundExceeded { limit: 1, .. })),
        "expected PaginationBoundExceeded, got {result:?}"
    );
}

#[tokio::test]
async fn ci_failures_use_the_same_transport() {
    let locator = sample_locator();
    let mut transport = MockForgeTransport::new();
    transport.expect_call_graphql().times(1).returning(|_, _| {
        Ok(json!({
            "data": { "repository": { "pullRequest": { "commits": { "nodes": [] } } } }
        }))
    });

    let failures = CommentIntake::new(&transport)
        .load_ci_failures(&locator, LogMode::Summary)
        .await
        .expect("CI collection should succeed");

    assert!(failures.is_empty());
}
