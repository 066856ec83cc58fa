//! Error types for URL issuing

use aws_sdk_s3::{
    error::{DisplayErrorContext, SdkError},
    operation::{get_object::GetObjectError, put_object::PutObjectError},
    presigning::PresigningConfigError,
};
use thiserror::Error;

/// Result type for URL issuing
pub type IssuerResult<T> = Result<T, IssuerError>;

/// Errors that can occur while issuing a signed URL
#[derive(Error, Debug)]
pub enum IssuerError {
    /// A required field was missing or empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Credentials or the signer itself failed
    #[error("Signing error: {0}")]
    SigningError(String),
}

/// Only for caller-chosen expiries; a rejected configured default is a `SigningError`
impl From<PresigningConfigError> for IssuerError {
    fn from(error: PresigningConfigError) -> Self {
        Self::InvalidArgument(format!("Invalid presigning config: {error}"))
    }
}

impl From<SdkError<PutObjectError>> for IssuerError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        Self::SigningError(DisplayErrorContext(&error).to_string())
    }
}

impl From<SdkError<GetObjectError>> for IssuerError {
    fn from(error: SdkError<GetObjectError>) -> Self {
        Self::SigningError(DisplayErrorContext(&error).to_string())
    }
}
