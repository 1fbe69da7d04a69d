//! PostgreSQL-backed `EntityStore` implementation

use async_trait::async_trait;
use sqlx::{
    postgres::{PgArguments, PgRow},
    PgPool, Postgres, Row, Transaction,
};
use std::marker::PhantomData;

use crate::{
    db::traits::{EntityStore, StoreTransaction},
    models::{Audit, Country, Entity, Greeting},
    Error, Result,
};

pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Row mapping between an entity and its table.
pub trait PgEntity: Entity {
    /// Bind the business fields in `Entity::COLUMNS` order.
    fn bind_fields<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q>;

    fn from_row(row: &PgRow) -> std::result::Result<Self, sqlx::Error>;
}

fn audit_from_row(row: &PgRow) -> std::result::Result<Audit, sqlx::Error> {
    Ok(Audit {
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl PgEntity for Country {
    fn bind_fields<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(self.name.clone()).bind(self.capital.clone())
    }

    fn from_row(row: &PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Country {
            id: Some(row.try_get("id")?),
            name: row.try_get("name")?,
            capital: row.try_get("capital")?,
            audit: audit_from_row(row)?,
        })
    }
}

impl PgEntity for Greeting {
    fn bind_fields<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(self.text.clone()).bind(self.language.clone())
    }

    fn from_row(row: &PgRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Greeting {
            id: Some(row.try_get("id")?),
            text: row.try_get("text")?,
            language: row.try_get("language")?,
            audit: audit_from_row(row)?,
        })
    }
}

fn returning_columns<E: Entity>() -> String {
    format!(
        "id, {}, version, created_at, updated_at",
        E::COLUMNS.join(", ")
    )
}

fn select_sql<E: Entity>() -> String {
    format!("SELECT {} FROM {}", returning_columns::<E>(), E::TABLE)
}

fn insert_sql<E: Entity>() -> String {
    let placeholders: Vec<String> = (1..=E::COLUMNS.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        E::TABLE,
        E::COLUMNS.join(", "),
        placeholders.join(", "),
        returning_columns::<E>()
    )
}

fn update_sql<E: Entity>() -> String {
    let assignments: Vec<String> = E::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ${}", i + 1))
        .collect();
    format!(
        "UPDATE {} SET {}, version = version + 1, updated_at = now() WHERE id = ${} RETURNING {}",
        E::TABLE,
        assignments.join(", "),
        E::COLUMNS.len() + 1,
        returning_columns::<E>()
    )
}

/// PostgreSQL-backed store, one table per entity type.
pub struct PostgresEntityStore<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for PostgresEntityStore<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<E> PostgresEntityStore<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: PgEntity> EntityStore<E> for PostgresEntityStore<E> {
    async fn find_all(&self) -> Result<Vec<E>> {
        let sql = format!("{} ORDER BY id", select_sql::<E>());
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        rows.iter()
            .map(|row| E::from_row(row).map_err(Error::Database))
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<E>> {
        let sql = format!("{} WHERE id = $1", select_sql::<E>());
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.as_ref()
            .map(E::from_row)
            .transpose()
            .map_err(Error::Database)
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction<E>>> {
        let tx = self.pool.begin().await.map_err(Error::Database)?;
        Ok(Box::new(PostgresTransaction {
            tx,
            _entity: PhantomData,
        }))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}

/// A `sqlx` transaction scoped to one service call.
///
/// `sqlx` rolls back on drop, so an abandoned transaction never commits partial work.
pub struct PostgresTransaction<E> {
    tx: Transaction<'static, Postgres>,
    _entity: PhantomData<fn() -> E>,
}

#[async_trait]
impl<E: PgEntity> StoreTransaction<E> for PostgresTransaction<E> {
    async fn find_by_id(&mut self, id: i64) -> Result<Option<E>> {
        let sql = format!("{} WHERE id = $1 FOR UPDATE", select_sql::<E>());
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(Error::Database)?;

        row.as_ref()
            .map(E::from_row)
            .transpose()
            .map_err(Error::Database)
    }

    async fn insert(&mut self, entity: &E) -> Result<E> {
        let sql = insert_sql::<E>();
        let row = entity
            .bind_fields(sqlx::query(&sql))
            .fetch_one(&mut *self.tx)
            .await
            .map_err(Error::Database)?;

        E::from_row(&row).map_err(Error::Database)
    }

    async fn update(&mut self, entity: &E) -> Result<E> {
        let id = entity.id().ok_or(Error::NotFound {
            entity: E::NAME,
            id: None,
        })?;

        let sql = update_sql::<E>();
        let row = entity
            .bind_fields(sqlx::query(&sql))
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::NotFound {
                entity: E::NAME,
                id: Some(id),
            })?;

        E::from_row(&row).map_err(Error::Database)
    }

    async fn delete(&mut self, id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let rows_affected = sqlx::query(&sql)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(Error::Database)?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(Error::Database)
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(Error::Database)
    }
}
