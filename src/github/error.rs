//! Error types exposed by the comment digest pipeline.

use thiserror::Error;

/// Errors surfaced while parsing input, calling the forge, or writing output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DigestError {
    /// The pull request reference could not be parsed.
    #[error("invalid pull request reference: {message}")]
    InvalidReference {
        /// Why the reference was rejected.
        message: String,
    },

    /// The `gh` process could not be started or exited with a failure status.
    #[error("{operation} failed: {message}")]
    TransportCall {
        /// Name of the forge operation being performed.
        operation: String,
        /// Diagnostic text captured from the process.
        message: String,
    },

    /// The transport returned output that is not valid JSON.
    #[error("failed to parse {operation} response: {snippet}")]
    ResponseParse {
        /// Name of the forge operation being performed.
        operation: String,
        /// Leading portion of the raw output, for diagnosis.
        snippet: String,
    },

    /// The GraphQL endpoint reported an error.
    #[error("GraphQL query returned errors: {message}")]
    GraphQl {
        /// Message of the first reported error.
        message: String,
    },

    /// The forge kept reporting more pages after the configured bound.
    #[error("{operation} still reported more pages after {limit} pages; results are incomplete")]
    PaginationBoundExceeded {
        /// Name of the paginated operation.
        operation: String,
        /// Maximum number of pages that were fetched.
        limit: u32,
    },

    /// The response was valid JSON but not the expected shape.
    #[error("unexpected {operation} response: {message}")]
    UnexpectedResponse {
        /// Name of the forge operation being performed.
        operation: String,
        /// Description of what was missing or malformed.
        message: String,
    },

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl DigestError {
    pub(crate) fn invalid_reference(message: impl Into<String>) -> Self {
        Self::InvalidReference {
            message: message.into(),
        }
    }

    pub(crate) fn unexpected(operation: &str, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            operation: operation.to_owned(),
            message: message.into(),
        }
    }
}
