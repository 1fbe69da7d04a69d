//! CRUD service - lifecycle rules for stored entities
//!
//! Reads go straight to the store. Every write runs inside one store transaction scoped to
//! the call and is either committed as a whole or rolled back.

use std::sync::Arc;

use crate::{
    db::EntityStore,
    metrics,
    models::{Country, Entity, Greeting},
    Error, Result,
};

pub struct CrudService<E: Entity> {
    store: Arc<dyn EntityStore<E>>,
}

pub type CountryService = CrudService<Country>;
pub type GreetingService = CrudService<Greeting>;

impl<E: Entity> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<E: Entity> CrudService<E> {
    pub fn new(store: Arc<dyn EntityStore<E>>) -> Self {
        Self { store }
    }

    fn record(method: &'static str) {
        metrics::record_invocation(E::NAME, method);
    }

    /// Every stored entity, in store order.
    pub async fn find_all(&self) -> Result<Vec<E>> {
        tracing::info!(entity = E::NAME, "> find_all");
        Self::record("findAll");

        let entities = self.store.find_all().await?;

        tracing::info!(entity = E::NAME, count = entities.len(), "< find_all");
        Ok(entities)
    }

    /// `None` when no entity has this id. A missing id is not an error.
    pub async fn find_one(&self, id: i64) -> Result<Option<E>> {
        tracing::info!(entity = E::NAME, id, "> find_one");
        Self::record("findOne");

        let entity = self.store.find_by_id(id).await?;

        tracing::info!(entity = E::NAME, id, found = entity.is_some(), "< find_one");
        Ok(entity)
    }

    /// Persist a new entity. The id must be unset; the store assigns it.
    pub async fn create(&self, entity: E) -> Result<E> {
        tracing::info!(entity = E::NAME, "> create");
        Self::record("create");

        if let Some(id) = entity.id() {
            let err = Error::AlreadyExists {
                entity: E::NAME,
                id,
            };
            tracing::error!(entity = E::NAME, id, error = %err, "Rejected create");
            tracing::info!(entity = E::NAME, id, "< create");
            return Err(err);
        }

        let mut tx = self.store.begin().await?;
        let saved = match tx.insert(&entity).await {
            Ok(saved) => saved,
            Err(e) => {
                rollback_quietly(tx).await;
                return Err(e);
            }
        };
        tx.commit().await?;

        tracing::info!(entity = E::NAME, id = saved.id(), "< create");
        Ok(saved)
    }

    /// Copy the business fields of `entity` onto the stored record with the same id.
    ///
    /// The stored id and audit fields win over whatever the caller supplied.
    pub async fn update(&self, entity: E) -> Result<E> {
        let id = entity.id();
        tracing::info!(entity = E::NAME, id, "> update");
        Self::record("update");

        let not_found = || {
            let err = Error::NotFound {
                entity: E::NAME,
                id,
            };
            tracing::error!(entity = E::NAME, id, error = %err, "Rejected update");
            tracing::info!(entity = E::NAME, id, "< update");
            err
        };
        let Some(id) = id else {
            return Err(not_found());
        };

        let mut tx = self.store.begin().await?;
        let stored = match tx.find_by_id(id).await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                rollback_quietly(tx).await;
                return Err(not_found());
            }
            Err(e) => {
                rollback_quietly(tx).await;
                return Err(e);
            }
        };

        let mut merged = stored;
        merged.apply_changes(&entity);

        let saved = match tx.update(&merged).await {
            Ok(saved) => saved,
            Err(e) => {
                rollback_quietly(tx).await;
                return Err(e);
            }
        };
        tx.commit().await?;

        tracing::info!(entity = E::NAME, id, version = saved.audit().version, "< update");
        Ok(saved)
    }

    /// Remove the entity with this id. Deleting a missing id is a no-op.
    pub async fn delete(&self, id: i64) -> Result<()> {
        tracing::info!(entity = E::NAME, id, "> delete");
        Self::record("delete");

        let mut tx = self.store.begin().await?;
        let removed = match tx.delete(id).await {
            Ok(removed) => removed,
            Err(e) => {
                rollback_quietly(tx).await;
                return Err(e);
            }
        };
        tx.commit().await?;

        if !removed {
            tracing::debug!(entity = E::NAME, id, "Nothing to delete");
        }
        tracing::info!(entity = E::NAME, id, "< delete");
        Ok(())
    }

    /// No cache sits in front of the store, so there is nothing to evict.
    pub fn evict_cache(&self) {
        tracing::info!(entity = E::NAME, "> evict_cache");
        Self::record("evictCache");
        tracing::info!(entity = E::NAME, "< evict_cache");
    }

    /// Connectivity check used by the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }
}

async fn rollback_quietly<E: Entity>(tx: Box<dyn crate::db::StoreTransaction<E>>) {
    if let Err(e) = tx.rollback().await {
        tracing::warn!(entity = E::NAME, error = %e, "Rollback failed");
    }
}
