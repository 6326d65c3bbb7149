//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create Axum Router with the edge handler
//! - Wire up middleware (request ID, tracing, metrics, timeout, security headers)
//! - Bind server to listener with graceful shutdown
//! - Dispatch each request to its route: flag image, identity page or 404

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware,
    response::Response,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{EdgeConfig, EdgeHeaders};
use crate::edge::EdgeContext;
use crate::http::middleware::track_metrics;
use crate::http::page::render_identity_page;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::http::response;
use crate::observability::metrics;
use crate::routing::{CountryCode, Route};
use crate::store::ObjectStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub edge: Arc<EdgeHeaders>,
}

/// HTTP server for the edge service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server reading flags from `store`.
    pub fn new(config: EdgeConfig, store: Arc<dyn ObjectStore>) -> Self {
        let state = AppState {
            store,
            edge: Arc::new(config.edge.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        let mut router = Router::new().fallback(edge_handler).with_state(state);

        if config.security.enable_headers {
            router = router
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                ));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        path = %req.uri().path(),
                        request_id = %request_id(req.headers()),
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn(track_metrics))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every path and method.
async fn edge_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, _body) = request.into_parts();
    let request_id = request_id(&parts.headers).to_string();
    let route = Route::classify(parts.uri.path());

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        path = %parts.uri.path(),
        route = route.label(),
        "Routing request"
    );

    match &route {
        Route::Flag(code) => serve_flag(state.store.as_ref(), code, &request_id).await,
        Route::IdentityPage => {
            let ctx = EdgeContext::capture(&parts, &state.edge);
            response::html(render_identity_page(&ctx))
        }
        Route::NotFound => response::not_found(),
    }
}

async fn serve_flag(store: &dyn ObjectStore, code: &CountryCode, request_id: &str) -> Response {
    let key = code.storage_key();

    match store.get(&key).await {
        Ok(Some(object)) => {
            metrics::record_store_lookup("hit");
            tracing::debug!(request_id = %request_id, key = %key, size = object.size(), "Serving flag");
            response::flag(object)
        }
        Ok(None) => {
            metrics::record_store_lookup("miss");
            tracing::info!(request_id = %request_id, key = %key, "Flag not found");
            response::flag_not_found()
        }
        Err(e) => {
            metrics::record_store_lookup("error");
            tracing::error!(request_id = %request_id, key = %key, error = %e, "Object store lookup failed");
            response::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryObjectStore, Result as StoreResult, StoreError, StoredObject};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    struct FailingStore;

    #[async_trait]
    impl ObjectStore for FailingStore {
        async fn get(&self, key: &str) -> StoreResult<Option<StoredObject>> {
            Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk on fire"),
            })
        }
    }

    fn server(store: Arc<dyn ObjectStore>) -> HttpServer {
        HttpServer::new(EdgeConfig::default(), store)
    }

    #[tokio::test]
    async fn test_store_failure_is_500() {
        let response = server(Arc::new(FailingStore))
            .router()
            .oneshot(Request::builder().uri("/secure/MY").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_request_id_generated_and_propagated() {
        let router = server(Arc::new(MemoryObjectStore::new())).router();

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/nowhere")
                    .header("x-request-id", "client-id-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "client-id-1");
    }

    #[tokio::test]
    async fn test_security_headers_toggle() {
        let request = || Request::builder().uri("/secure").body(Body::empty()).unwrap();

        let response = server(Arc::new(MemoryObjectStore::new()))
            .router()
            .oneshot(request())
            .await
            .unwrap();
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.headers()[header::REFERRER_POLICY], "no-referrer");

        let mut config = EdgeConfig::default();
        config.security.enable_headers = false;
        let response = HttpServer::new(config, Arc::new(MemoryObjectStore::new()))
            .router()
            .oneshot(request())
            .await
            .unwrap();
        assert!(response.headers().get(header::X_CONTENT_TYPE_OPTIONS).is_none());
    }
}
