//! Grouping and ordering of inline review comments for rendering.
//!
//! Files appear in the order their first comment arrived, which follows the
//! forge's diff traversal. Within a file, comments are sorted by line
//! (ascending, comments without a current line last); ties keep arrival
//! order.

use std::cmp::Ordering;

use crate::github::ReviewComment;

/// Groups comments by file path in order of first appearance.
///
/// Each group is sorted by line with a stable sort.
pub(crate) fn group_by_path(comments: &[ReviewComment]) -> Vec<(&str, Vec<&ReviewComment>)> {
    let mut groups: Vec<(&str, Vec<&ReviewComment>)> = Vec::new();

    for comment in comments {
        let path = comment.path.as_str();
        match groups.iter_mut().find(|(existing, _)| *existing == path) {
            Some((_, members)) => members.push(comment),
            None => groups.push((path, vec![comment])),
        }
    }

    for (_, members) in &mut groups {
        members.sort_by(|a, b| compare_options(a.line.as_ref(), b.line.as_ref()));
    }

    groups
}

/// Compares two optional values, sorting `None` after `Some`.
fn compare_options<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a_val), Some(b_val)) => a_val.cmp(b_val),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
