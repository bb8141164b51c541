//! Error type for calls to the remote question-answering API.

use thiserror::Error;

/// Failure of a single upstream call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The configured base URL cannot be used.
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    /// Transport failure or undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// A required field was absent from a 2xx response.
    #[error("Response is missing field `{0}`")]
    MissingField(&'static str),

    /// The call was abandoned before it finished.
    #[error("Request cancelled")]
    Cancelled,
}

/// Result type alias for upstream calls.
pub type Result<T> = std::result::Result<T, ApiError>;
