//! HTTP calls to the issuer and direct calls to storage

use bytes::Bytes;
use common_types::{ApiErrorResponse, ImageUrlResponse, UploadUrlResponse};
use reqwest::{header::CONTENT_TYPE, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{status_text, ClientError, ClientResult};

/// Talks to the image backend and follows the URLs it issues
#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UploadClient {
    /// Creates a client for the backend at `base_url`
    ///
    /// A path prefix on `base_url` is kept, so `http://host/images` sends
    /// requests to `http://host/images/api/...`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if `base_url` is not an absolute URL
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Ok(Self::with_http_client(
            reqwest::Client::new(),
            Url::parse(base_url)?,
        ))
    }

    /// Creates a client reusing an existing HTTP client
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, mut base_url: Url) -> Self {
        // Relative joins replace the last segment unless the path ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self { http, base_url }
    }

    /// Backend the client talks to
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Asks the issuer for a signed PUT URL
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Issuer` with the backend's message on a non-2xx answer
    #[instrument(skip(self))]
    pub async fn request_upload_url(
        &self,
        file_name: &str,
        file_type: &str,
    ) -> ClientResult<UploadUrlResponse> {
        let response = self
            .http
            .post(self.endpoint("api/upload-image")?)
            .query(&[("filename", file_name), ("filetype", file_type)])
            .send()
            .await?;

        parse_issuer_response(response).await
    }

    /// Asks the issuer for a signed GET URL
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Issuer` with the backend's message on a non-2xx answer
    #[instrument(skip(self))]
    pub async fn request_image_url(&self, key: &str) -> ClientResult<ImageUrlResponse> {
        let response = self
            .http
            .get(self.endpoint("api/image-url")?)
            .query(&[("key", key)])
            .send()
            .await?;

        parse_issuer_response(response).await
    }

    fn endpoint(&self, route: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(route)?)
    }

    /// Sends `body` to storage through a signed PUT URL
    ///
    /// `content_type` must match the type the URL was issued for.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transfer` with the status text on a non-2xx answer,
    /// or the error text if the request never completed
    #[instrument(skip(self, body), fields(len = body.len()))]
    pub async fn put_object(&self, url: &str, content_type: &str, body: Bytes) -> ClientResult<()> {
        let response = self
            .http
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|err| ClientError::Transfer(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "Storage rejected upload");
            return Err(ClientError::Transfer(status_text(status)));
        }

        Ok(())
    }

    /// Reads an object through a signed GET URL
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transfer` on a non-2xx answer or network failure
    #[instrument(skip(self))]
    pub async fn get_object(&self, url: &str) -> ClientResult<Bytes> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| ClientError::Transfer(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Transfer(status_text(status)));
        }

        response
            .bytes()
            .await
            .map_err(|err| ClientError::Transfer(err.to_string()))
    }
}

async fn parse_issuer_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ApiErrorResponse>().await {
        Ok(envelope) => envelope.error.message,
        Err(_) => status_text(status),
    };

    Err(ClientError::Issuer { status, message })
}
