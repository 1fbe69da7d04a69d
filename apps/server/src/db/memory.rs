//! In-process `EntityStore` implementation.
//!
//! Keeps one table per entity type behind an async mutex. Used by the test harness and
//! for running the API without a database.
//!
//! A transaction owns the table lock for its whole lifetime and works on a staged copy;
//! `commit` swaps the copy in, while `rollback` (or dropping the transaction) discards it.

use async_trait::async_trait;
use chrono::Utc;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    db::traits::{EntityStore, StoreTransaction},
    models::{Audit, Entity},
    Error, Result,
};

#[derive(Clone)]
struct MemoryTable<E> {
    rows: BTreeMap<i64, E>,
    next_id: i64,
}

impl<E> Default for MemoryTable<E> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

pub struct InMemoryEntityStore<E> {
    table: Arc<Mutex<MemoryTable<E>>>,
}

impl<E> InMemoryEntityStore<E> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(MemoryTable::default())),
        }
    }
}

impl<E> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for InMemoryEntityStore<E> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for InMemoryEntityStore<E> {
    async fn find_all(&self) -> Result<Vec<E>> {
        let table = self.table.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction<E>>> {
        let guard = self.table.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, staged }))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

pub struct InMemoryTransaction<E> {
    guard: OwnedMutexGuard<MemoryTable<E>>,
    staged: MemoryTable<E>,
}

#[async_trait]
impl<E: Entity> StoreTransaction<E> for InMemoryTransaction<E> {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<E>> {
        Ok(self.staged.rows.get(&id).cloned())
    }

    async fn insert(&mut self, entity: &E) -> Result<E> {
        let id = self.staged.next_id;
        self.staged.next_id += 1;

        let mut row = entity.clone();
        row.set_id(Some(id));
        *row.audit_mut() = Audit {
            version: 0,
            created_at: Some(Utc::now()),
            updated_at: None,
        };

        self.staged.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&mut self, entity: &E) -> Result<E> {
        let id = entity.id();
        let stored = match id {
            Some(id) => self.staged.rows.get_mut(&id),
            None => None,
        };
        let row = stored.ok_or(Error::NotFound {
            entity: E::NAME,
            id,
        })?;

        row.apply_changes(entity);
        let audit = row.audit_mut();
        audit.version += 1;
        audit.updated_at = Some(Utc::now());

        Ok(row.clone())
    }

    async fn delete(&mut self, id: i64) -> Result<bool> {
        Ok(self.staged.rows.remove(&id).is_some())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
