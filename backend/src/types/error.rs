//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common_types::{ApiErrorResponse, ErrorBody};

use crate::url_issuer::IssuerError;

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, code: &str, msg: impl Into<String>, retry: bool) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody {
                    code: code.to_string(),
                    message: msg.into(),
                },
            },
        }
    }

    /// HTTP status the error maps to
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert issuer errors to application errors
impl From<IssuerError> for AppError {
    fn from(err: IssuerError) -> Self {
        match err {
            IssuerError::InvalidArgument(msg) => {
                tracing::warn!("Invalid argument: {msg}");
                Self::new(StatusCode::BAD_REQUEST, "invalid_argument", msg, false)
            }
            IssuerError::SigningError(msg) => {
                // Details stay in the logs; they may name credentials or config
                tracing::error!("Signing error: {msg}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "signing_error",
                    "Failed to generate presigned URL",
                    false,
                )
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
