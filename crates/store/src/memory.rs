//! In-memory store — useful for testing and ephemeral deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use switchyard_core::error::StoreError;
use switchyard_core::{Entity, Store};

/// An in-memory store keyed by the entity's primary key.
///
/// Cloning is cheap and shares the underlying map, so a store handle can
/// be handed to the engine and to tests simultaneously.
pub struct MemoryStore<T: Entity> {
    records: Arc<RwLock<HashMap<String, T>>>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

#[async_trait]
impl<T: Entity> Store<T> for MemoryStore<T> {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn get(&self, key: &str) -> Result<Option<T>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn create(&self, entity: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        let key = entity.key().to_string();
        if records.contains_key(&key) {
            return Err(StoreError::DuplicateKey(key));
        }
        records.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, key: &str, entity: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        if !records.contains_key(key) {
            return Err(StoreError::MissingKey(key.to_string()));
        }
        // Keys are stable; the replacement lands in the same slot.
        records.insert(key.to_string(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(key).is_some())
    }
}
