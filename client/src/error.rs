//! Client-side error types

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced while requesting URLs or transferring bytes
#[derive(Error, Debug)]
pub enum ClientError {
    /// The issuer answered with a non-success status
    #[error("{message}")]
    Issuer {
        /// Status returned by the issuer
        status: StatusCode,
        /// Message from the error envelope, or the status text
        message: String,
    },

    /// Direct PUT/GET against storage failed
    #[error("{0}")]
    Transfer(String),

    /// The request to the issuer could not be completed
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend base URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Text for a status, preferring the canonical reason phrase
pub(crate) fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_string(), str::to_string)
}
