use std::sync::Arc;

use image_backend::{server, types::Environment, url_issuer::UrlIssuer};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production, regular format for development
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();
    if environment.json_logs() {
        fmt().json().with_env_filter(env_filter).init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    let storage_config = environment.storage_config();
    tracing::debug!(?storage_config, "Loaded storage configuration");

    let url_issuer = Arc::new(
        UrlIssuer::from_config(&storage_config, environment.presigned_url_expiry_secs()).await,
    );

    server::start(environment, url_issuer).await
}
