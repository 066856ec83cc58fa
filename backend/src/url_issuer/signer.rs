//! Request signers backing the URL issuer

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    config::{Credentials, RequestChecksumCalculation},
    presigning::PresigningConfig,
    Client as S3Client,
};
use common_types::TransferMethod;
use tracing::debug;

use super::error::{IssuerError, IssuerResult};
use crate::types::StorageConfig;

/// Signs a single (method, key, expiry) request against the bucket
#[async_trait]
pub trait UrlSigner: Send + Sync {
    /// Returns the presigned URL for the request described by the arguments
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::SigningError` when the request cannot be signed
    async fn presign(
        &self,
        method: TransferMethod,
        key: &str,
        content_type: Option<&str>,
        presigning_config: PresigningConfig,
    ) -> IssuerResult<String>;

    /// Whether the signer has the settings it needs to produce URLs
    fn is_configured(&self) -> bool {
        true
    }
}

/// Signer backed by the S3 SDK's SigV4 presigner
pub struct S3UrlSigner {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl S3UrlSigner {
    /// Creates a signer from a pre-configured S3 client
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }

    /// Builds the S3 client described by `config`
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::SigningError` naming every missing variable
    pub async fn from_config(config: &StorageConfig) -> IssuerResult<Self> {
        let (Some(endpoint), Some(access_key_id), Some(secret_access_key), Some(bucket_name)) = (
            config.endpoint.as_ref(),
            config.access_key_id.as_ref(),
            config.secret_access_key.as_ref(),
            config.bucket_name.as_ref(),
        ) else {
            return Err(IssuerError::SigningError(format!(
                "Storage is not configured, missing: {}",
                config.missing_variables().join(", ")
            )));
        };

        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "cloudflare-r2",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            // Keep SDK checksum query params out of presigned PUTs; R2 rejects them
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .build();

        Ok(Self::new(
            Arc::new(S3Client::from_conf(s3_config)),
            bucket_name.clone(),
        ))
    }

    /// Bucket the signer targets
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

#[async_trait]
impl UrlSigner for S3UrlSigner {
    async fn presign(
        &self,
        method: TransferMethod,
        key: &str,
        content_type: Option<&str>,
        presigning_config: PresigningConfig,
    ) -> IssuerResult<String> {
        debug!(%method, key, "Presigning request");

        let presigned = match method {
            TransferMethod::Put => self
                .s3_client
                .put_object()
                .bucket(&self.bucket_name)
                .key(key)
                .set_content_type(content_type.map(str::to_string))
                .presigned(presigning_config)
                .await
                .map_err(IssuerError::from)?,
            TransferMethod::Get => self
                .s3_client
                .get_object()
                .bucket(&self.bucket_name)
                .key(key)
                .presigned(presigning_config)
                .await
                .map_err(IssuerError::from)?,
        };

        Ok(presigned.uri().to_string())
    }
}

/// Stand-in used when storage settings are incomplete; every request fails
#[derive(Debug, Clone)]
pub struct UnconfiguredSigner {
    reason: String,
}

impl UnconfiguredSigner {
    #[must_use]
    pub const fn new(reason: String) -> Self {
        Self { reason }
    }
}

#[async_trait]
impl UrlSigner for UnconfiguredSigner {
    async fn presign(
        &self,
        _method: TransferMethod,
        _key: &str,
        _content_type: Option<&str>,
        _presigning_config: PresigningConfig,
    ) -> IssuerResult<String> {
        Err(IssuerError::SigningError(self.reason.clone()))
    }

    fn is_configured(&self) -> bool {
        false
    }
}
