//! Response construction.
//!
//! # Responsibilities
//! - Build the flag image response from a stored object
//! - Build the identity page response
//! - Map misses and store failures to fixed plain-text responses
//!
//! # Design Decisions
//! - Store metadata headers are written first, then `etag` and
//!   `content-type` override them
//! - Error bodies are fixed strings; details go to the log only

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::store::StoredObject;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";
pub const HTML_CONTENT_TYPE: &str = "text/html;charset=UTF-8";

pub const FLAG_NOT_FOUND: &str = "Flag not found in R2";
pub const NOT_FOUND: &str = "Not Found";
pub const INTERNAL_ERROR: &str = "Internal Server Error";

/// 200 with the object's bytes served as SVG.
pub fn flag(object: StoredObject) -> Response {
    let mut headers = HeaderMap::new();
    object.metadata.write_headers(&mut headers);

    match HeaderValue::from_str(&object.http_etag()) {
        Ok(etag) => {
            headers.insert(header::ETAG, etag);
        }
        Err(_) => {
            tracing::warn!(key = %object.key, "Object etag is not a valid header value");
        }
    }
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(SVG_CONTENT_TYPE));

    (StatusCode::OK, headers, Body::from(object.body)).into_response()
}

/// 200 with an HTML document.
pub fn html(page: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)],
        page,
    )
        .into_response()
}

pub fn flag_not_found() -> Response {
    (StatusCode::NOT_FOUND, FLAG_NOT_FOUND).into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND).into_response()
}

pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HttpMetadata;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_flag_response_overrides_content_type() {
        let metadata = HttpMetadata {
            content_type: Some("application/octet-stream".into()),
            cache_control: Some("public, max-age=86400".into()),
            ..HttpMetadata::default()
        };
        let object = StoredObject::new("my.svg", "<svg>my</svg>", metadata);
        let etag = object.http_etag();

        let response = flag(object);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], SVG_CONTENT_TYPE);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=86400");
        assert_eq!(response.headers()[header::ETAG], etag.as_str());
        assert_eq!(body_text(response).await, "<svg>my</svg>");
    }

    #[tokio::test]
    async fn test_error_responses() {
        let response = flag_not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, FLAG_NOT_FOUND);

        let response = not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, NOT_FOUND);

        let response = internal_error();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }

    #[tokio::test]
    async fn test_html_content_type() {
        let response = html("<p>hi</p>".into());
        assert_eq!(response.headers()[header::CONTENT_TYPE], HTML_CONTENT_TYPE);
        assert_eq!(body_text(response).await, "<p>hi</p>");
    }
}
