//! Shared application state

use crate::{
    config::Config,
    db::{EntityStore, InMemoryEntityStore, PostgresEntityStore},
    models::{Country, Greeting},
    services::{CountryService, GreetingService},
    Result,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Persist entities in PostgreSQL.
    Postgres,
    /// Keep entities in process memory. Nothing survives a restart.
    InMemory,
}

impl StoreKind {
    pub fn from_config(config: &Config) -> Self {
        if config.uses_postgres() {
            StoreKind::Postgres
        } else {
            StoreKind::InMemory
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppStateOptions {
    pub store: StoreKind,
    pub run_migrations: bool,
    pub seed_sample_data: bool,
}

impl AppStateOptions {
    /// Options derived from the `database` section of the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            store: StoreKind::from_config(config),
            run_migrations: config.database.run_migrations,
            seed_sample_data: config.database.seed_sample_data,
        }
    }
}

impl Default for AppStateOptions {
    fn default() -> Self {
        Self {
            store: StoreKind::Postgres,
            run_migrations: true,
            seed_sample_data: false,
        }
    }
}

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub country_service: Arc<CountryService>,
    pub greeting_service: Arc<GreetingService>,
}

impl AppState {
    /// Initialize the application state
    pub async fn new(config: Config) -> Result<Self> {
        let options = AppStateOptions::from_config(&config);
        Self::new_with_options(config, options).await
    }

    pub async fn new_with_options(config: Config, options: AppStateOptions) -> Result<Self> {
        tracing::info!(store = ?options.store, "Initializing application state...");

        let config_arc = Arc::new(config);

        let db_pool = match options.store {
            StoreKind::Postgres => {
                let db_pool = create_db_pool(config_arc.as_ref()).await?;

                if options.run_migrations {
                    tracing::info!("Running database migrations...");
                    sqlx::migrate!("./migrations")
                        .run(&db_pool)
                        .await
                        .map_err(|e| crate::Error::Internal(format!("Migration failed: {}", e)))?;
                }

                Some(db_pool)
            }
            StoreKind::InMemory => None,
        };

        let country_store: Arc<dyn EntityStore<Country>> = match &db_pool {
            Some(pool) => Arc::new(PostgresEntityStore::<Country>::new(pool.clone())),
            None => Arc::new(InMemoryEntityStore::<Country>::new()),
        };
        let greeting_store: Arc<dyn EntityStore<Greeting>> = match &db_pool {
            Some(pool) => Arc::new(PostgresEntityStore::<Greeting>::new(pool.clone())),
            None => Arc::new(InMemoryEntityStore::<Greeting>::new()),
        };

        let state = Self {
            config: config_arc,
            country_service: Arc::new(CountryService::new(country_store)),
            greeting_service: Arc::new(GreetingService::new(greeting_store)),
        };

        if options.seed_sample_data {
            crate::startup::seed_sample_data(&state).await?;
        }

        tracing::info!("Application state initialized");
        Ok(state)
    }
}

async fn create_db_pool(config: &Config) -> Result<PgPool> {
    tracing::info!("Creating database connection pool...");

    let statement_timeout = config.database.statement_timeout_seconds;
    let lock_timeout = config.database.lock_timeout_seconds;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(config.database.pool_min_size)
        .max_connections(config.database.pool_max_size)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.pool_timeout_seconds,
        ))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                sqlx::query(&format!("SET statement_timeout = '{}s'", statement_timeout))
                    .execute(&mut *conn)
                    .await?;
                sqlx::query(&format!("SET lock_timeout = '{}s'", lock_timeout))
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .connect(&config.database.url)
        .await
        .map_err(crate::Error::Database)?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.database.pool_min_size,
        config.database.pool_max_size
    );

    Ok(pool)
}
