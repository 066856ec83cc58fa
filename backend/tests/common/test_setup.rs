use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use image_backend::{
    server,
    types::{Environment, StorageConfig},
    url_issuer::UrlIssuer,
};
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "test-images";
pub const TEST_ENDPOINT: &str = "http://localhost:4566";

/// Setup test tracing
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Storage settings that sign locally without contacting any bucket
pub fn test_storage_config() -> StorageConfig {
    StorageConfig::new(TEST_ENDPOINT, "test-access-key", "test-secret-key", TEST_BUCKET)
        .with_force_path_style(true)
}

/// Base test setup with core dependencies
pub struct TestSetup {
    pub router: Router,
    pub environment: Environment,
    pub url_issuer: Arc<UrlIssuer>,
}

impl TestSetup {
    pub async fn new() -> Self {
        Self::for_environment(Environment::Development {
            presign_expiry_override: None,
        })
        .await
    }

    pub async fn for_environment(environment: Environment) -> Self {
        let url_issuer = Arc::new(
            UrlIssuer::from_config(
                &test_storage_config(),
                environment.presigned_url_expiry_secs(),
            )
            .await,
        );

        Self::with_issuer(environment, url_issuer)
    }

    pub fn with_issuer(environment: Environment, url_issuer: Arc<UrlIssuer>) -> Self {
        setup_test_env();

        let router = server::router(environment.clone(), url_issuer.clone());

        Self {
            router,
            environment,
            url_issuer,
        }
    }

    pub async fn send_request(
        &self,
        method: &str,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method(method)
            .body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_post_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_request("POST", route).await
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_request("GET", route).await
    }
}
