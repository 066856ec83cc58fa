use std::sync::Arc;

use aide::axum::IntoApiResponse;
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;

use crate::url_issuer::UrlIssuer;

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    /// Current version of the application
    semver: String,
    /// Commit hash of the current build (if available)
    rev: Option<String>,
    /// False when storage settings are missing and every signing request will fail
    storage_configured: bool,
}

/// Health check endpoint
///
/// The service stays up without storage settings, so this reports liveness
/// alongside whether signed URLs can be issued.
pub async fn handler(Extension(issuer): Extension<Arc<UrlIssuer>>) -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        rev: option_env!("GIT_REV").map(ToString::to_string),
        storage_configured: issuer.storage_configured(),
    })
}
