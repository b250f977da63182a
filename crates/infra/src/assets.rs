//! Asset storage for generated images.

use std::collections::HashMap;
use std::sync::RwLock;

/// Asset store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssetStoreError {
    #[error("storage error: {0}")]
    Storage(String),
}

/// Durable object storage fronted by a public URL space.
///
/// The CDN/hosting side is an external collaborator; this trait only covers
/// the write path the generator needs.
pub trait AssetStore: Send + Sync {
    /// Store `bytes` under `key` and return the object's public URL.
    fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AssetStoreError>;
}

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory asset store for tests/dev.
#[derive(Debug)]
pub struct InMemoryAssetStore {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryAssetStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw bytes of a stored object (test hook).
    pub fn object_bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .ok()
            .and_then(|m| m.get(key).map(|o| o.bytes.clone()))
    }

    /// Content type recorded for a stored object (test hook).
    pub fn object_content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .ok()
            .and_then(|m| m.get(key).map(|o| o.content_type.clone()))
    }
}

impl Default for InMemoryAssetStore {
    fn default() -> Self {
        Self::new("https://assets.playforge.dev")
    }
}

impl AssetStore for InMemoryAssetStore {
    fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AssetStoreError> {
        let mut objects = self
            .objects
            .write()
            .map_err(|_| AssetStoreError::Storage("lock poisoned".to_string()))?;
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }
}
