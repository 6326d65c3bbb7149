//! In-memory object store.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::body::Bytes;

use crate::store::{HttpMetadata, ObjectStore, Result, StoredObject};

/// Immutable map of objects, populated before it is shared.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: HashMap<String, StoredObject>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object with no HTTP metadata.
    pub fn with_object(self, key: impl Into<String>, body: impl Into<Bytes>) -> Self {
        self.with_object_metadata(key, body, HttpMetadata::default())
    }

    pub fn with_object_metadata(
        mut self,
        key: impl Into<String>,
        body: impl Into<Bytes>,
        metadata: HttpMetadata,
    ) -> Self {
        let key = key.into();
        let object = StoredObject::new(key.clone(), body, metadata);
        self.objects.insert(key, object);
        self
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, key: &str) -> Result<Option<StoredObject>> {
        Ok(self.objects.get(key).cloned())
    }
}
