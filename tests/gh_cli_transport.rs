//! Integration tests for the `gh` CLI transport against a fake executable.
#![cfg(unix)]

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use prdigest::{CommentIntake, DigestError, ForgeTransport, GhCliTransport, PullRequestLocator};
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const FAKE_GH: &str = r#"#!/bin/sh
case "$1 $2" in
  "api graphql")
    printf '%s' '{"data":{"repository":{"pullRequest":{"reviewThreads":{"pageInfo":{"hasNextPage":false,"endCursor":null},"nodes":[{"id":"T1","isResolved":false,"path":"src/x.py","line":10,"comments":{"nodes":[{"author":{"login":"amy"},"body":"fix typo","diffHunk":"@@ -1 +1 @@"}]}}]}}}}}'
    ;;
  "api -H")
    printf '%s' '[{"user":{"login":"bob"},"body":"LGTM"}]'
    ;;
  "run view")
    printf 'step ok\nFAILED test_widget\n'
    ;;
  *)
    echo "unexpected arguments: $*" >&2
    exit 2
    ;;
esac
"#;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir should be created")
}

fn create_script(
    temp_dir: &TempDir,
    contents: &str,
) -> Result<Utf8PathBuf, Box<dyn std::error::Error>> {
    use cap_std::fs::PermissionsExt;

    let name = "gh";
    let temp_utf8 = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
        .map_err(|_| "temporary directory path is not valid UTF-8")?;
    let dir = Dir::open_ambient_dir(&temp_utf8, ambient_authority())?;
    dir.write(name, contents)?;

    let mut permissions = dir.metadata(name)?.permissions();
    permissions.set_mode(0o755);
    dir.set_permissions(name, permissions)?;

    Ok(temp_utf8.join(name))
}

fn transport_for(
    temp_dir: &TempDir,
    contents: &str,
) -> Result<GhCliTransport, Box<dyn std::error::Error>> {
    let path = create_script(temp_dir, contents)?;
    Ok(GhCliTransport::with_command_path(path))
}

#[rstest]
#[tokio::test]
async fn intake_renders_comments_from_gh(temp_dir: TempDir) -> TestResult {
    let transport = transport_for(&temp_dir, FAKE_GH)?;
    let locator = PullRequestLocator::parse("acme/widgets/pull/42")?;

    let bundle = CommentIntake::new(&transport).load(&locator).await?;
    let document = prdigest::render_markdown(&bundle, &locator);

    assert!(document.contains("### @bob\n\nLGTM"), "{document}");
    assert!(document.contains("### File: `src/x.py`"), "{document}");
    assert!(document.contains("#### Line 10 (@amy)"), "{document}");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn run_log_returns_stdout(temp_dir: TempDir) -> TestResult {
    let transport = transport_for(&temp_dir, FAKE_GH)?;

    let log = transport.run_log(7).await?;

    assert_eq!(log, "step ok\nFAILED test_widget\n");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn non_zero_exit_reports_stderr(temp_dir: TempDir) -> TestResult {
    let script = "#!/bin/sh\necho 'HTTP 401: Bad credentials' >&2\nexit 1\n";
    let transport = transport_for(&temp_dir, script)?;

    let result = transport.call_rest("/repos/acme/widgets/issues/42/comments").await;

    assert_eq!(
        result,
        Err(DigestError::TransportCall {
            operation: "gh API call".to_owned(),
            message: "HTTP 401: Bad credentials".to_owned(),
        })
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn graphql_errors_are_surfaced(temp_dir: TempDir) -> TestResult {
    let script = concat!(
        "#!/bin/sh\n",
        "printf '%s' '{\"data\":null,\"errors\":[{\"message\":\"Could not resolve to a Repository\"}]}'\n",
        "echo 'gh: Could not resolve to a Repository' >&2\n",
        "exit 1\n",
    );
    let transport = transport_for(&temp_dir, script)?;

    let result = transport.call_graphql("query { viewer { login } }", &json!({})).await;

    assert_eq!(
        result,
        Err(DigestError::GraphQl {
            message: "Could not resolve to a Repository".to_owned(),
        })
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn graphql_exit_without_error_payload_reports_stderr(temp_dir: TempDir) -> TestResult {
    let script = "#!/bin/sh\necho 'HTTP 502: Bad Gateway' >&2\nexit 1\n";
    let transport = transport_for(&temp_dir, script)?;

    let result = transport.call_graphql("query { viewer { login } }", &json!({})).await;

    assert_eq!(
        result,
        Err(DigestError::TransportCall {
            operation: "gh GraphQL call".to_owned(),
            message: "HTTP 502: Bad Gateway".to_owned(),
        })
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn non_json_output_is_a_parse_error(temp_dir: TempDir) -> TestResult {
    let script = "#!/bin/sh\necho 'not json'\n";
    let transport = transport_for(&temp_dir, script)?;

    let result = transport.call_rest("/repos/acme/widgets/issues/42/comments").await;

    assert!(
        matches!(
            result,
            Err(DigestError::ResponseParse { ref snippet, .. }) if snippet.contains("not json")
        ),
        "expected ResponseParse, got {result:?}"
    );
    Ok(())
}
