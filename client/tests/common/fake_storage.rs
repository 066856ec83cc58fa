use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};

/// Object stored by the fake bucket
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// In-memory stand-in for an S3-compatible bucket addressed path-style
///
/// Accepts any request carrying a SigV4 query signature; the signature
/// itself is not verified.
#[derive(Clone, Default)]
pub struct FakeStorage {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    reject_uploads: Arc<AtomicBool>,
}

impl FakeStorage {
    pub fn router(&self) -> Router {
        Router::new().fallback(handle).with_state(self.clone())
    }

    /// Makes every following PUT fail with 403
    pub fn reject_uploads(&self, reject: bool) {
        self.reject_uploads.store(reject, Ordering::SeqCst);
    }

    /// Object stored at `/{bucket}/{key}`
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&format!("/{bucket}/{key}"))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

async fn handle(
    State(storage): State<FakeStorage>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !uri.query().unwrap_or_default().contains("X-Amz-Signature=") {
        return StatusCode::FORBIDDEN.into_response();
    }

    let path = uri.path().to_string();

    match method {
        Method::PUT => {
            if storage.reject_uploads.load(Ordering::SeqCst) {
                return StatusCode::FORBIDDEN.into_response();
            }

            let content_type = headers
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            storage.objects.lock().unwrap().insert(
                path,
                StoredObject {
                    content_type,
                    data: body.to_vec(),
                },
            );

            StatusCode::OK.into_response()
        }
        Method::GET => match storage.objects.lock().unwrap().get(&path) {
            Some(object) => object.data.clone().into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
