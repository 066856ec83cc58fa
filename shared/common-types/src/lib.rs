//! Wire types shared by the image backend and its upload client

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Message returned alongside every freshly issued upload URL
pub const UPLOAD_URL_MESSAGE: &str = "Presigned URL generated successfully for upload";

/// HTTP verb a signed URL is scoped to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TransferMethod {
    /// Direct upload of the object body
    Put,
    /// Direct download of the object body
    Get,
}

/// Response for `/api/upload-image`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    /// Presigned PUT URL
    pub url: String,
    /// Object key the upload will be stored under
    pub file_name: String,
    /// Human-readable confirmation
    pub message: String,
    /// RFC 3339 UTC timestamp when the URL stops being accepted
    pub expires_at: String,
}

/// Response for `/api/image-url`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlResponse {
    /// Presigned GET URL
    pub url: String,
    /// Object key the URL reads
    pub file_name: String,
    /// RFC 3339 UTC timestamp when the URL stops being accepted
    pub expires_at: String,
}

/// API error response envelope
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    pub error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}
