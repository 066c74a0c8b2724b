//! Decoding of raw `gh` output into JSON payloads.

use serde_json::Value;

use crate::github::error::DigestError;

const SNIPPET_CHARS: usize = 200;

/// Parses process stdout as JSON.
pub(super) fn parse_json(operation: &str, stdout: &[u8]) -> Result<Value, DigestError> {
    serde_json::from_slice(stdout).map_err(|error| {
        let raw = String::from_utf8_lossy(stdout);
        DigestError::ResponseParse {
            operation: operation.to_owned(),
            snippet: format!("{error}; output began with: {}", snippet(&raw)),
        }
    })
}

/// Rejects GraphQL payloads carrying a non-empty top-level `errors` list.
pub(super) fn reject_graphql_errors(payload: Value) -> Result<Value, DigestError> {
    let first_error = payload
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first());

    match first_error {
        None => Ok(payload),
        Some(error) => Err(DigestError::GraphQl {
            message: error
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| error.to_string(), ToOwned::to_owned),
        }),
    }
}

/// Returns at most the first few hundred characters of `raw`.
fn snippet(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut taken: String = trimmed.chars().take(SNIPPET_CHARS).collect();
    if taken.len() < trimmed.len() {
        taken.push('…');
    }
    taken
}
