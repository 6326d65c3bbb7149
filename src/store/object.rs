//! Stored objects and their HTTP metadata.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Cacheable HTTP metadata kept alongside an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpMetadata {
    pub content_type: Option<String>,
    pub content_language: Option<String>,
    pub content_disposition: Option<String>,
    pub content_encoding: Option<String>,
    pub cache_control: Option<String>,
    /// Emitted as `Expires`.
    pub cache_expiry: Option<DateTime<Utc>>,
}

impl HttpMetadata {
    /// Metadata carrying only a Cache-Control directive.
    pub fn with_cache_control(cache_control: Option<String>) -> Self {
        Self {
            cache_control,
            ..Self::default()
        }
    }

    /// Copy every present field into `headers`, replacing existing values.
    ///
    /// Values that cannot be encoded as header values are skipped.
    pub fn write_headers(&self, headers: &mut HeaderMap) {
        let expires = self
            .cache_expiry
            .map(|at| at.format("%a, %d %b %Y %H:%M:%S GMT").to_string());

        let fields: [(HeaderName, Option<&str>); 6] = [
            (header::CONTENT_TYPE, self.content_type.as_deref()),
            (header::CONTENT_LANGUAGE, self.content_language.as_deref()),
            (header::CONTENT_DISPOSITION, self.content_disposition.as_deref()),
            (header::CONTENT_ENCODING, self.content_encoding.as_deref()),
            (header::CACHE_CONTROL, self.cache_control.as_deref()),
            (header::EXPIRES, expires.as_deref()),
        ];

        for (name, value) in fields {
            let Some(value) = value else { continue };
            match HeaderValue::from_str(value) {
                Ok(v) => {
                    headers.insert(name, v);
                }
                Err(_) => {
                    tracing::warn!(header = %name, "Skipping metadata value that is not a valid header");
                }
            }
        }
    }
}

/// An object read from the store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub body: Bytes,
    pub metadata: HttpMetadata,
    /// Unquoted content hash.
    pub etag: String,
}

impl StoredObject {
    /// Build an object, deriving the etag from the body.
    pub fn new(key: impl Into<String>, body: impl Into<Bytes>, metadata: HttpMetadata) -> Self {
        let body = body.into();
        let etag = content_hash(&body);
        Self {
            key: key.into(),
            body,
            metadata,
            etag,
        }
    }

    /// The etag as sent on the wire, in double quotes.
    pub fn http_etag(&self) -> String {
        format!("\"{}\"", self.etag)
    }

    pub fn size(&self) -> usize {
        self.body.len()
    }
}

/// Lowercase hex SHA-256 of `content`.
pub fn content_hash(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}
