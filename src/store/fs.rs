//! Filesystem-backed object store.
//!
//! Objects are plain files under a root directory. Optional HTTP metadata for
//! `<key>` lives next to it in `<key>.meta.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::store::{HttpMetadata, ObjectStore, Result, StoreError, StoredObject};

const METADATA_SUFFIX: &str = ".meta.json";

/// Serves objects from files under `root`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
    default_metadata: HttpMetadata,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>, default_metadata: HttpMetadata) -> Self {
        Self {
            root: root.into(),
            default_metadata,
        }
    }

    /// Open the store described by `config`, failing if the root is not a directory.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let is_dir = tokio::fs::metadata(&config.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(StoreError::InvalidRoot(config.root.clone()));
        }

        tracing::info!(root = %config.root.display(), "Object store opened");
        Ok(Self::new(
            config.root.clone(),
            HttpMetadata::with_cache_control(config.cache_control.clone()),
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keys are single file names; anything that could escape `root` names no object.
    fn object_path(&self, key: &str) -> Option<PathBuf> {
        let addressable = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\', '\0']);
        addressable.then(|| self.root.join(key))
    }

    async fn read_metadata(&self, key: &str, path: &Path) -> Result<HttpMetadata> {
        let mut sidecar = path.as_os_str().to_owned();
        sidecar.push(METADATA_SUFFIX);

        match tokio::fs::read(&sidecar).await {
            Ok(raw) => serde_json::from_slice(&raw).map_err(|source| StoreError::Metadata {
                key: key.to_string(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(self.default_metadata.clone()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn get(&self, key: &str) -> Result<Option<StoredObject>> {
        let Some(path) = self.object_path(key) else {
            tracing::debug!(key = %key, "Key cannot name an object");
            return Ok(None);
        };

        let body = match tokio::fs::read(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };

        let metadata = self.read_metadata(key, &path).await?;
        Ok(Some(StoredObject::new(key, body, metadata)))
    }
}
