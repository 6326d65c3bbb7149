//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use edge_flags::config::EdgeConfig;
use edge_flags::http::HttpServer;
use edge_flags::store::{HttpMetadata, MemoryObjectStore, ObjectStore};

pub const MY_FLAG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="red"/></svg>"#;
pub const US_FLAG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="blue"/></svg>"#;

/// Store holding `my.svg` (no metadata) and `us.svg` (with cache metadata).
pub fn flag_store() -> MemoryObjectStore {
    MemoryObjectStore::new()
        .with_object("my.svg", MY_FLAG)
        .with_object_metadata(
            "us.svg",
            US_FLAG,
            HttpMetadata {
                content_type: Some("text/plain".into()),
                cache_control: Some("public, max-age=86400".into()),
                ..HttpMetadata::default()
            },
        )
}

/// Fully layered router over `store` with default configuration.
pub fn router_with(store: impl ObjectStore) -> Router {
    HttpServer::new(EdgeConfig::default(), Arc::new(store)).router()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// Drive one request through `router` in-process.
pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    TestResponse { status, headers, body }
}

pub async fn get(router: Router, path: &str) -> TestResponse {
    send(router, Request::builder().uri(path).body(Body::empty()).unwrap()).await
}
