//! Presigned URL issuing for direct bucket transfers
mod error;
mod signer;

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use aws_sdk_s3::presigning::PresigningConfig;
use chrono::{DateTime, SubsecRound, Utc};
use common_types::TransferMethod;
use tracing::{debug, warn};

pub use error::{IssuerError, IssuerResult};
pub use signer::{S3UrlSigner, UnconfiguredSigner, UrlSigner};

use crate::{keys, types::StorageConfig};

/// Presigned URL scoped to one method and one object key
#[derive(Debug, Clone)]
pub struct SignedUrl {
    /// The presigned URL
    pub url: String,
    /// Verb the URL authorizes
    pub method: TransferMethod,
    /// Object key the URL is scoped to
    pub key: String,
    /// When the signature was made (whole seconds)
    pub issued_at: DateTime<Utc>,
    /// When storage stops accepting the URL
    pub expires_at: DateTime<Utc>,
}

/// Issues presigned PUT/GET URLs for the image bucket
pub struct UrlIssuer {
    signer: Arc<dyn UrlSigner>,
    presigned_url_expiry_secs: u64,
}

impl UrlIssuer {
    /// Creates a new issuer
    ///
    /// # Arguments
    ///
    /// * `signer` - Signer producing the URLs
    /// * `presigned_url_expiry_secs` - Default lifetime of issued URLs
    #[must_use]
    pub fn new(signer: Arc<dyn UrlSigner>, presigned_url_expiry_secs: u64) -> Self {
        Self {
            signer,
            presigned_url_expiry_secs,
        }
    }

    /// Creates an issuer backed by the S3 presigner
    ///
    /// Incomplete settings do not fail here: the issuer is still returned and
    /// every signing attempt reports the missing variables.
    pub async fn from_config(config: &StorageConfig, presigned_url_expiry_secs: u64) -> Self {
        let signer: Arc<dyn UrlSigner> = match S3UrlSigner::from_config(config).await {
            Ok(signer) => {
                debug!(bucket = signer.bucket_name(), "Storage signer configured");
                Arc::new(signer)
            }
            Err(IssuerError::SigningError(reason) | IssuerError::InvalidArgument(reason)) => {
                warn!("{reason}; signed URL requests will fail until storage is configured");
                Arc::new(UnconfiguredSigner::new(reason))
            }
        };

        Self::new(signer, presigned_url_expiry_secs)
    }

    /// Default lifetime of issued URLs in seconds
    #[must_use]
    pub const fn presigned_url_expiry_secs(&self) -> u64 {
        self.presigned_url_expiry_secs
    }

    /// Whether storage settings were complete when the issuer was built
    #[must_use]
    pub fn storage_configured(&self) -> bool {
        self.signer.is_configured()
    }

    /// Issues a signed URL for `method` on `key`
    ///
    /// # Arguments
    ///
    /// * `key` - Object key, must be non-empty
    /// * `content_type` - Content type the upload must carry; required for PUT, ignored for GET
    /// * `method` - Verb the URL authorizes
    /// * `expiry_secs` - Lifetime override; the issuer default applies when `None`
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::InvalidArgument` if a required field is empty or `expiry_secs` is rejected
    /// Returns `IssuerError::SigningError` if the signer fails or the configured default expiry is rejected
    pub async fn issue(
        &self,
        key: &str,
        content_type: Option<&str>,
        method: TransferMethod,
        expiry_secs: Option<u64>,
    ) -> IssuerResult<SignedUrl> {
        if key.trim().is_empty() {
            return Err(IssuerError::InvalidArgument(
                "object key must not be empty".to_string(),
            ));
        }

        let content_type = match method {
            TransferMethod::Put => Some(
                content_type
                    .map(str::trim)
                    .filter(|content_type| !content_type.is_empty())
                    .ok_or_else(|| {
                        IssuerError::InvalidArgument(
                            "content type must not be empty for uploads".to_string(),
                        )
                    })?,
            ),
            TransferMethod::Get => None,
        };

        let expires_in =
            Duration::from_secs(expiry_secs.unwrap_or(self.presigned_url_expiry_secs));
        // Signatures carry whole seconds, so the reported times do too
        let issued_at = Utc::now().trunc_subsecs(0);

        let presigning_config = PresigningConfig::builder()
            .start_time(SystemTime::from(issued_at))
            .expires_in(expires_in)
            .build()
            .map_err(|err| match expiry_secs {
                Some(_) => IssuerError::from(err),
                // The default comes from server configuration, not from the caller
                None => IssuerError::SigningError(format!("Configured URL expiry rejected: {err}")),
            })?;

        let url = self
            .signer
            .presign(method, key, content_type, presigning_config)
            .await?;

        debug!(%method, key, "Issued signed URL");

        Ok(SignedUrl {
            url,
            method,
            key: key.to_string(),
            issued_at,
            expires_at: issued_at + expires_in,
        })
    }

    /// Issues a PUT URL for a browser upload
    ///
    /// Without a caller-supplied `key`, the key is derived from `file_name`
    /// with a timestamp and random suffix.
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::InvalidArgument` if `file_name` or `file_type` is empty
    /// Returns `IssuerError::SigningError` if the signer fails
    pub async fn issue_upload_url(
        &self,
        file_name: &str,
        file_type: &str,
        key: Option<&str>,
    ) -> IssuerResult<SignedUrl> {
        if file_name.trim().is_empty() || file_type.trim().is_empty() {
            return Err(IssuerError::InvalidArgument(
                "Missing filename or filetype query parameter".to_string(),
            ));
        }

        let key = key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map_or_else(|| keys::unique_object_key(file_name.trim()), str::to_string);

        self.issue(&key, Some(file_type), TransferMethod::Put, None)
            .await
    }

    /// Issues a GET URL for displaying a stored object
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::InvalidArgument` if `key` is empty
    /// Returns `IssuerError::SigningError` if the signer fails
    pub async fn issue_read_url(&self, key: &str) -> IssuerResult<SignedUrl> {
        self.issue(key.trim(), None, TransferMethod::Get, None).await
    }
}
