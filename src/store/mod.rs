//! Read-only object store for flag images.
//!
//! # Data Flow
//! ```text
//! CountryCode::storage_key()
//!     → ObjectStore::get(key)          (single await point per request)
//!     → Ok(Some(StoredObject))          body + HttpMetadata + etag
//!     → Ok(None)                        miss, surfaced as 404
//!     → Err(StoreError)                 backend failure, surfaced as 500
//! ```
//!
//! # Backends
//! - [`FsObjectStore`]: objects are files under a root directory
//! - [`MemoryObjectStore`]: immutable in-memory map, for tests and embedding

pub mod fs;
pub mod memory;
pub mod object;

use async_trait::async_trait;
use thiserror::Error;

pub use fs::FsObjectStore;
pub use memory::MemoryObjectStore;
pub use object::{content_hash, HttpMetadata, StoredObject};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error reading '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metadata for '{key}': {source}")]
    Metadata {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("store root {0} is not a directory")]
    InvalidRoot(std::path::PathBuf),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Key-value blob storage, read side only.
///
/// Implementations must be `Send + Sync + 'static` so a single instance can be
/// shared across request tasks behind an `Arc`.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Fetch the object stored under `key`.
    ///
    /// A missing object is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>>;
}
