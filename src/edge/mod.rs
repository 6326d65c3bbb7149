//! Identity and location metadata attached to requests at the edge.
//!
//! The access gateway authenticates the caller before the request arrives and
//! injects the identity header; the edge network annotates the connection
//! with the visitor's country. Both are trusted as-is.

use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::EdgeHeaders;

/// Identity shown when the gateway sent none.
pub const UNKNOWN_USER: &str = "Unknown User";

/// Country shown when the edge network sent none.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Connection-level country code attached by the hosting platform.
///
/// Insert this as a request extension to take precedence over the geo header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoHint(pub String);

/// Per-request metadata read once at the start of handling.
#[derive(Debug, Clone)]
pub struct EdgeContext {
    pub identity: String,
    pub country: String,
    pub timestamp: DateTime<Utc>,
}

impl EdgeContext {
    /// Read identity, country and the current time from a request.
    pub fn capture(parts: &Parts, headers: &EdgeHeaders) -> Self {
        let identity = header_text(&parts.headers, &headers.identity_header)
            .unwrap_or(UNKNOWN_USER)
            .to_string();

        let country = parts
            .extensions
            .get::<GeoHint>()
            .map(|hint| hint.0.as_str())
            .filter(|code| !code.is_empty())
            .or_else(|| header_text(&parts.headers, &headers.geo_header))
            .unwrap_or(UNKNOWN_COUNTRY)
            .to_string();

        Self {
            identity,
            country,
            timestamp: Utc::now(),
        }
    }

    /// Timestamp in ISO-8601, millisecond precision, `Z` suffix.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}
