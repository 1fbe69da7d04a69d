//! Repository abstractions

use async_trait::async_trait;

use crate::{models::Entity, Result};

/// Basic persistence for one entity type.
///
/// Reads outside a transaction go straight to the store. Every write happens inside a
/// [`StoreTransaction`] obtained from [`EntityStore::begin`].
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// All stored entities, in store-defined order.
    async fn find_all(&self) -> Result<Vec<E>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<E>>;

    /// Open a transaction. Dropping it without `commit` discards its writes.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction<E>>>;

    /// Cheap connectivity check for health probes.
    async fn ping(&self) -> Result<()>;
}

/// Unit of work spanning the reads and writes of a single service operation.
#[async_trait]
pub trait StoreTransaction<E: Entity>: Send {
    /// Read a row and hold it for the rest of the transaction.
    async fn find_by_id(&mut self, id: i64) -> Result<Option<E>>;

    /// Insert the business fields of `entity`; returns the row with id and audit set.
    async fn insert(&mut self, entity: &E) -> Result<E>;

    /// Overwrite the business fields of the row identified by `entity.id()`.
    async fn update(&mut self, entity: &E) -> Result<E>;

    /// Returns whether a row was removed.
    async fn delete(&mut self, id: i64) -> Result<bool>;

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn rollback(self: Box<Self>) -> Result<()>;
}
