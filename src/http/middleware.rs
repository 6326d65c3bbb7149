//! Request metrics middleware.
//!
//! Sits outside the timeout layer so requests cut off by the timeout are
//! counted with the status the client actually received.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::observability::metrics;
use crate::routing::Route;

pub async fn track_metrics(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let route = Route::classify(req.uri().path()).label();

    let response = next.run(req).await;

    metrics::record_request(route, response.status().as_u16(), start_time);
    response
}
