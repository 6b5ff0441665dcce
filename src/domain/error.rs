//! Domain-level error types for exercism-watch.
//!
//! All errors are typed with `thiserror` and carry enough context for a
//! user-facing message without exposing the stored token.

use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// No token is stored for the configured service/account pair.
    #[error(
        "Unable to find GitHub personal access token. \
         Re-run using `exercism-watch set-token <token>` before querying"
    )]
    CredentialNotFound,

    /// Input rejected before any external call was made.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The secret store process failed or wrote diagnostics.
    #[error("Credential store error: {message}")]
    CredentialStore {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The `Link` header of a paged response could not be interpreted.
    #[error("Pagination error: {message}")]
    PaginationParse { message: String },

    /// Any HTTP-layer failure: transport, timeout, or non-success status.
    #[error("GitHub API request failed: {message}")]
    ApiRequest {
        message: String,
        status: Option<u16>,
    },

    /// Invalid data received from the API.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create a JSON parse error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create an API error, optionally tagged with the HTTP status.
    pub fn api(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::ApiRequest {
            message: message.into(),
            status,
        }
    }

    /// Create a credential store error from a diagnostic message.
    pub fn credential_store(message: impl Into<String>) -> Self {
        Self::CredentialStore {
            message: message.into(),
            source: None,
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
