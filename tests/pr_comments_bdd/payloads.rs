//! Forge payload builders for the digest BDD tests.

use serde_json::{Value, json};

/// Builds a review thread node holding a single comment.
pub(crate) fn review_thread(id: &str, path: &str, line: u32, author: &str, body: &str) -> Value {
    json!({
        "id": id,
        "isResolved": false,
        "path": path,
        "line": line,
        "startLine": null,
        "comments": {
            "pageInfo": { "hasNextPage": false, "endCursor": null },
            "nodes": [{
                "author": { "login": author },
                "body": body,
                "diffHunk": "@@ -1,3 +1,3 @@\n-old\n+new"
            }]
        }
    })
}

/// Wraps thread nodes in a `reviewThreads` response page.
pub(crate) fn review_page(threads: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "data": { "repository": { "pullRequest": { "reviewThreads": {
            "pageInfo": {
                "hasNextPage": next_cursor.is_some(),
                "endCursor": next_cursor
            },
            "nodes": threads
        }}}}
    })
}
