//! Cursor state and page bounds for paginated forge queries.
//!
//! `PageCursor` tracks the GraphQL `pageInfo` of the most recent page.
//! `PageBudget` counts fetched pages against the configured bound so that a
//! forge that keeps reporting `hasNextPage` cannot keep the fetch alive
//! forever; hitting the bound is an error, never a silent truncation.

use super::error::DigestError;

/// Default maximum number of pages fetched per paginated query.
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Opaque cursor and continuation flag for the most recent page.
///
/// # Example
///
/// ```
/// use prdigest::github::pagination::PageCursor;
///
/// let cursor = PageCursor::new(Some("Y3Vyc29yOjE=".to_owned()), true);
/// assert!(cursor.has_next_page());
/// assert_eq!(cursor.end_cursor(), Some("Y3Vyc29yOjE="));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor {
    end_cursor: Option<String>,
    has_next_page: bool,
}

impl PageCursor {
    /// Creates a cursor from page information.
    #[must_use]
    pub const fn new(end_cursor: Option<String>, has_next_page: bool) -> Self {
        Self {
            end_cursor,
            has_next_page,
        }
    }

    /// Returns the end cursor of the page, if the forge reported one.
    #[must_use]
    pub fn end_cursor(&self) -> Option<&str> {
        self.end_cursor.as_deref()
    }

    /// Returns true if the forge reported more pages.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Returns the cursor to request next, or `None` on the last page.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::UnexpectedResponse`] when the forge reports
    /// another page but no cursor to reach it.
    pub fn into_next(self, operation: &str) -> Result<Option<String>, DigestError> {
        if !self.has_next_page {
            return Ok(None);
        }
        self.end_cursor.map(Some).ok_or_else(|| {
            DigestError::unexpected(operation, "hasNextPage is true but endCursor is missing")
        })
    }
}

/// Counts fetched pages against a fixed bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageBudget {
    operation: &'static str,
    limit: u32,
    fetched: u32,
}

impl PageBudget {
    pub(crate) const fn new(operation: &'static str, limit: u32) -> Self {
        Self {
            operation,
            limit,
            fetched: 0,
        }
    }

    pub(crate) const fn record_page(&mut self) {
        self.fetched = self.fetched.saturating_add(1);
    }

    pub(crate) const fn fetched(&self) -> u32 {
        self.fetched
    }

    /// Fails once the bound is reached while the forge still has more pages.
    pub(crate) fn ensure_more_allowed(&self) -> Result<(), DigestError> {
        if self.fetched >= self.limit {
            return Err(DigestError::PaginationBoundExceeded {
                operation: self.operation.to_owned(),
                limit: self.limit,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{PageBudget, PageCursor};
    use crate::github::DigestError;

    #[rstest]
    fn last_page_has_no_next_cursor() {
        let cursor = PageCursor::new(Some("abc".to_owned()), false);
        assert_eq!(cursor.into_next("threads").expect("valid cursor"), None);
    }

    #[rstest]
    fn next_page_yields_end_cursor() {
        let cursor = PageCursor::new(Some("abc".to_owned()), true);
        assert_eq!(
            cursor.into_next("threads").expect("valid cursor"),
            Some("abc".to_owned())
        );
    }

    #[rstest]
    fn next_page_without_cursor_is_rejected() {
        let result = PageCursor::new(None, true).into_next("threads");
        assert!(
            matches!(result, Err(DigestError::UnexpectedResponse { .. })),
            "expected UnexpectedResponse, got {result:?}"
        );
    }

    #[rstest]
    #[case(1, 0, true)]
    #[case(2, 1, true)]
    #[case(2, 2, false)]
    fn budget_allows_pages_below_limit(
        #[case] limit: u32,
        #[case] pages: u32,
        #[case] allowed: bool,
    ) {
        let mut budget = PageBudget::new("threads", limit);
        for _ in 0..pages {
            budget.record_page();
        }
        assert_eq!(budget.fetched(), pages);
        assert_eq!(budget.ensure_more_allowed().is_ok(), allowed);
    }

    #[rstest]
    fn exceeded_budget_reports_operation_and_limit() {
        let mut budget = PageBudget::new("review threads", 1);
        budget.record_page();
        assert_eq!(
            budget.ensure_more_allowed(),
            Err(DigestError::PaginationBoundExceeded {
                operation: "review threads".to_owned(),
                limit: 1,
            })
        );
    }
}
