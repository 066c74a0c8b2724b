//! Options shared by the comment fetchers.

use super::pagination::DEFAULT_MAX_PAGES;

/// Tuning for comment retrieval.
///
/// # Example
///
/// ```
/// use prdigest::FetchOptions;
///
/// let options = FetchOptions::default()
///     .with_max_pages(5)
///     .with_include_resolved(true);
/// assert_eq!(options.max_pages(), 5);
/// assert!(options.include_resolved());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    max_pages: u32,
    include_resolved: bool,
}

impl FetchOptions {
    /// Sets the maximum number of pages fetched per paginated query.
    #[must_use]
    pub const fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Sets whether resolved review threads are included.
    #[must_use]
    pub const fn with_include_resolved(mut self, include_resolved: bool) -> Self {
        self.include_resolved = include_resolved;
        self
    }

    /// Maximum number of pages fetched per paginated query.
    #[must_use]
    pub const fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Returns true if resolved review threads are included.
    #[must_use]
    pub const fn include_resolved(&self) -> bool {
        self.include_resolved
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            include_resolved: false,
        }
    }
}
