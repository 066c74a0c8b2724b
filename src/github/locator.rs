//! Pull request reference parsing and identity wrappers.

use std::fmt;

use url::Url;

use super::error::DigestError;

const PULL_MARKER: &str = "pull";
const MAX_OWNER_LEN: usize = 39;
const MAX_REPOSITORY_LEN: usize = 100;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates a GitHub user or organisation login.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidReference`] when the value is empty, too
    /// long, or contains characters outside the login grammar.
    pub fn new(value: &str) -> Result<Self, DigestError> {
        if value.is_empty() {
            return Err(DigestError::invalid_reference("repository owner is empty"));
        }
        let well_formed = value.len() <= MAX_OWNER_LEN
            && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !value.starts_with('-')
            && !value.ends_with('-')
            && !value.contains("--");
        if !well_formed {
            return Err(DigestError::invalid_reference(format!(
                "'{value}' is not a valid repository owner"
            )));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates a repository name.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidReference`] when the value is empty, too
    /// long, a relative path component, or contains unsupported characters.
    pub fn new(value: &str) -> Result<Self, DigestError> {
        if value.is_empty() {
            return Err(DigestError::invalid_reference("repository name is empty"));
        }
        let well_formed = value.len() <= MAX_REPOSITORY_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && value != "."
            && value != "..";
        if !well_formed {
            return Err(DigestError::invalid_reference(format!(
                "'{value}' is not a valid repository name"
            )));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Largest number a GraphQL `Int` can carry.
const MAX_NUMBER: u64 = 2_147_483_647;

/// Pull request number, between 1 and the GraphQL `Int` maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Wraps a pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidReference`] when the value is zero or
    /// does not fit a GraphQL `Int`.
    pub fn new(value: u64) -> Result<Self, DigestError> {
        if value == 0 {
            return Err(DigestError::invalid_reference(
                "pull request number must be a positive integer",
            ));
        }
        if value > MAX_NUMBER {
            return Err(DigestError::invalid_reference(format!(
                "pull request number {value} exceeds {MAX_NUMBER}"
            )));
        }
        Ok(Self(value))
    }

    fn parse(segment: &str) -> Result<Self, DigestError> {
        if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
            return Err(DigestError::invalid_reference(format!(
                "pull request number must be a positive integer, got '{segment}'"
            )));
        }
        segment
            .parse::<u64>()
            .map_err(|error| DigestError::invalid_reference(format!("'{segment}': {error}")))
            .and_then(Self::new)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Canonical (owner, repository, number) triple identifying a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Parses a reference of the form `owner/repo/pull/<number>` or a GitHub
    /// URL `https://github.com/owner/repo/pull/<number>`.
    ///
    /// Leading and trailing slashes are tolerated in the path form. URLs may
    /// carry extra trailing segments such as `/files`, which are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidReference`] when the reference does not
    /// have the four-segment shape, the trailing segment is not a positive
    /// integer, or owner/repository are empty or malformed.
    ///
    /// # Example
    ///
    /// ```
    /// use prdigest::PullRequestLocator;
    ///
    /// let locator = PullRequestLocator::parse("acme/widgets/pull/42")
    ///     .expect("reference should parse");
    /// assert_eq!(locator.owner().as_str(), "acme");
    /// assert_eq!(locator.repository().as_str(), "widgets");
    /// assert_eq!(locator.number().get(), 42);
    /// ```
    pub fn parse(reference: &str) -> Result<Self, DigestError> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return Err(DigestError::invalid_reference(
                "pull request reference is empty",
            ));
        }

        if trimmed.contains("://") {
            return Self::parse_url(trimmed);
        }

        let segments: Vec<&str> = trimmed.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            [owner, repository, marker, number] if *marker == PULL_MARKER => {
                Self::from_segments(owner, repository, number)
            }
            _ => Err(shape_error(reference)),
        }
    }

    fn parse_url(input: &str) -> Result<Self, DigestError> {
        let parsed = Url::parse(input)
            .map_err(|error| DigestError::invalid_reference(format!("'{input}': {error}")))?;

        let mut segments = parsed.path_segments().ok_or_else(|| shape_error(input))?;
        let mut next = || segments.next().ok_or_else(|| shape_error(input));

        let owner = next()?;
        let repository = next()?;
        let marker = next()?;
        let number = next()?;

        if marker != PULL_MARKER {
            return Err(shape_error(input));
        }

        Self::from_segments(owner, repository, number)
    }

    fn from_segments(owner: &str, repository: &str, number: &str) -> Result<Self, DigestError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repository)?,
            number: PullRequestNumber::parse(number)?,
        })
    }

    /// Builds a locator from discrete owner, repository and number values.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidReference`] when any part is invalid.
    pub fn from_parts(owner: &str, repository: &str, number: u64) -> Result<Self, DigestError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repository)?,
            number: PullRequestNumber::new(number)?,
        })
    }

    /// Resolves a locator from either a reference string or the three
    /// discrete parts. A reference takes precedence when both are supplied.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidReference`] when the reference is
    /// malformed or when no reference is given and a part is missing.
    pub fn resolve(
        reference: Option<&str>,
        owner: Option<&str>,
        repository: Option<&str>,
        number: Option<u64>,
    ) -> Result<Self, DigestError> {
        match (reference, owner, repository, number) {
            (Some(value), _, _, _) => Self::parse(value),
            (None, Some(owner_value), Some(repository_value), Some(number_value)) => {
                Self::from_parts(owner_value, repository_value, number_value)
            }
            _ => Err(DigestError::invalid_reference(
                "provide either a reference like owner/repo/pull/<number> \
                 or all of owner, repo and number",
            )),
        }
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn issue_comments_path(&self, per_page: usize, page: u32) -> String {
        format!(
            "/repos/{}/{}/issues/{}/comments?per_page={per_page}&page={page}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }
}

impl fmt::Display for PullRequestLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}#{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }
}

fn shape_error(reference: &str) -> DigestError {
    DigestError::invalid_reference(format!(
        "'{reference}' does not match owner/repo/pull/<number>"
    ))
}
