use std::sync::Arc;

use axum::{extract::Query, Extension, Json};
use common_types::{ImageUrlResponse, UploadUrlResponse, UPLOAD_URL_MESSAGE};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use crate::{types::AppError, url_issuer::UrlIssuer};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UploadImageQuery {
    /// Original name of the file being uploaded
    pub filename: Option<String>,
    /// MIME type the upload will be sent with
    pub filetype: Option<String>,
    /// Exact object key to store under instead of a generated one
    pub key: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ImageUrlQuery {
    /// Object key to read
    pub key: Option<String>,
}

/// Creates a presigned URL for uploading an image straight to the bucket
///
/// The object key is derived from `filename` with a timestamp and random
/// suffix unless `key` is given. The client must send the PUT with the same
/// `Content-Type` as `filetype`.
///
/// # Errors
///
/// - `IssuerError::InvalidArgument` - `filename` or `filetype` is missing or empty (400)
/// - `IssuerError::SigningError` - storage credentials are missing or signing failed (500)
#[instrument(skip(issuer))]
pub async fn create_upload_url(
    Extension(issuer): Extension<Arc<UrlIssuer>>,
    Query(query): Query<UploadImageQuery>,
) -> Result<Json<UploadUrlResponse>, AppError> {
    let signed = issuer
        .issue_upload_url(
            query.filename.as_deref().unwrap_or_default(),
            query.filetype.as_deref().unwrap_or_default(),
            query.key.as_deref(),
        )
        .await?;

    tracing::info!("Generated upload URL for key: {}", signed.key);

    Ok(Json(UploadUrlResponse {
        url: signed.url,
        file_name: signed.key,
        message: UPLOAD_URL_MESSAGE.to_string(),
        expires_at: signed.expires_at.to_rfc3339(),
    }))
}

/// Creates a presigned URL for displaying a stored image
///
/// # Errors
///
/// - `IssuerError::InvalidArgument` - `key` is missing or empty (400)
/// - `IssuerError::SigningError` - storage credentials are missing or signing failed (500)
#[instrument(skip(issuer))]
pub async fn create_image_url(
    Extension(issuer): Extension<Arc<UrlIssuer>>,
    Query(query): Query<ImageUrlQuery>,
) -> Result<Json<ImageUrlResponse>, AppError> {
    let signed = issuer
        .issue_read_url(query.key.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(ImageUrlResponse {
        url: signed.url,
        file_name: signed.key,
        expires_at: signed.expires_at.to_rfc3339(),
    }))
}
