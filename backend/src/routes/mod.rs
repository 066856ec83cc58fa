mod docs;
mod health;
pub mod images;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .api_route(
            "/api/upload-image",
            post(images::create_upload_url).get(images::create_upload_url),
        )
        .api_route("/api/image-url", get(images::create_image_url))
}
