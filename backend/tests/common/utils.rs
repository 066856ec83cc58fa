use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use axum::response::Response;
use common_types::TransferMethod;
use http_body_util::BodyExt;
use image_backend::url_issuer::{IssuerError, IssuerResult, UrlSigner};

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Value of a query parameter in a presigned URL
pub fn query_param(presigned_url: &str, name: &str) -> Option<String> {
    url::Url::parse(presigned_url)
        .unwrap()
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Signer that simulates an unreachable or misconfigured provider
#[derive(Default)]
pub struct FailingSigner {
    pub calls: AtomicUsize,
}

impl FailingSigner {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlSigner for FailingSigner {
    async fn presign(
        &self,
        _method: TransferMethod,
        _key: &str,
        _content_type: Option<&str>,
        _presigning_config: PresigningConfig,
    ) -> IssuerResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(IssuerError::SigningError(
            "invalid credentials for account 1234".to_string(),
        ))
    }
}
