use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use axum::Router;
use common_types::TransferMethod;
use image_backend::{
    server,
    types::{Environment, StorageConfig},
    url_issuer::{IssuerError, IssuerResult, S3UrlSigner, UrlIssuer, UrlSigner},
};
use tokio::net::TcpListener;
use upload_client::UploadClient;

use super::FakeStorage;

pub const TEST_BUCKET: &str = "test-images";

/// Serves `router` on an ephemeral local port
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

/// Which signer the backend under test uses
pub enum SignerSetup {
    /// Real SigV4 signing against the fake bucket
    Working,
    /// Storage settings are incomplete
    Unconfigured,
    /// Uploads sign fine but read URLs fail
    ReadsFail,
}

/// Backend plus fake bucket, both listening on localhost
pub struct TestServers {
    pub storage: FakeStorage,
    pub backend_addr: SocketAddr,
}

impl TestServers {
    pub async fn start(signer_setup: SignerSetup) -> Self {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init()
            .ok();

        let storage = FakeStorage::default();
        let storage_addr = spawn(storage.router()).await;

        let mut storage_config = StorageConfig::new(
            format!("http://{storage_addr}"),
            "test-access-key",
            "test-secret-key",
            TEST_BUCKET,
        )
        .with_force_path_style(true);

        let environment = Environment::Development {
            presign_expiry_override: None,
        };
        let expiry = environment.presigned_url_expiry_secs();

        let url_issuer = match signer_setup {
            SignerSetup::Working => UrlIssuer::from_config(&storage_config, expiry).await,
            SignerSetup::Unconfigured => {
                storage_config.secret_access_key = None;
                UrlIssuer::from_config(&storage_config, expiry).await
            }
            SignerSetup::ReadsFail => {
                let inner = S3UrlSigner::from_config(&storage_config).await.unwrap();
                UrlIssuer::new(Arc::new(UploadOnlySigner { inner }), expiry)
            }
        };

        let backend_addr = spawn(server::router(environment, Arc::new(url_issuer))).await;

        Self {
            storage,
            backend_addr,
        }
    }

    pub fn client(&self) -> UploadClient {
        UploadClient::new(&format!("http://{}", self.backend_addr)).unwrap()
    }
}

/// Client for a backend that is not listening
pub async fn unreachable_client() -> UploadClient {
    // Bind and drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    UploadClient::new(&format!("http://{addr}")).unwrap()
}

struct UploadOnlySigner {
    inner: S3UrlSigner,
}

#[async_trait]
impl UrlSigner for UploadOnlySigner {
    async fn presign(
        &self,
        method: TransferMethod,
        key: &str,
        content_type: Option<&str>,
        presigning_config: PresigningConfig,
    ) -> IssuerResult<String> {
        match method {
            TransferMethod::Put => {
                self.inner
                    .presign(method, key, content_type, presigning_config)
                    .await
            }
            TransferMethod::Get => Err(IssuerError::SigningError("read signing down".to_string())),
        }
    }
}
