//! Store trait — a generic keyed collection over the domain entities.
//!
//! The policy engine reads and writes exclusively through this interface.
//! Note that `create`/`update` enforce only key presence — every policy
//! decision (exclusivity, duplicates per kind) lives in the engine.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::{Assignment, Toggle};

/// An entity with a string primary key.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The primary key of this record.
    fn key(&self) -> &str;
}

impl Entity for Toggle {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Entity for Assignment {
    fn key(&self) -> &str {
        &self.id
    }
}

/// The generic persistence interface consumed by the engine.
///
/// Implementations: in-memory (testing and ephemeral deployments) in
/// `switchyard-store`.
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    /// The backend name (e.g., "memory").
    fn name(&self) -> &str;

    /// All records, in no significant order.
    async fn get_all(&self) -> Result<Vec<T>, StoreError>;

    /// A single record by key, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<T>, StoreError>;

    /// Persist a new record. Fails with [`StoreError::DuplicateKey`] if
    /// the key is already present.
    async fn create(&self, entity: T) -> Result<T, StoreError>;

    /// Replace the record stored under `key`. Fails with
    /// [`StoreError::MissingKey`] if absent — there is no
    /// create-on-missing fallback.
    async fn update(&self, key: &str, entity: T) -> Result<T, StoreError>;

    /// Remove a record by key. Returns `false` if it was absent.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;
}
