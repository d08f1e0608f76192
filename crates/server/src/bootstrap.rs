use std::sync::Arc;

use catalog_core::config::{AppConfig, ConfigError, DatabaseBackend, LoadOptions};
use catalog_db::{
    connect_with_settings, migrations, CatalogSeed, DbPool, InMemoryProductRepository,
    ProductRepository, RepositoryError, SqlProductRepository,
};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub products: Arc<dyn ProductRepository>,
    /// Present only for the sqlite backend.
    pub db_pool: Option<DbPool>,
}

impl Application {
    pub async fn shutdown(self) {
        if let Some(pool) = self.db_pool {
            pool.close().await;
        }
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("catalog seed failed: {0}")]
    Seed(#[source] RepositoryError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        backend = ?config.database.backend,
        "starting application bootstrap"
    );

    let (products, db_pool): (Arc<dyn ProductRepository>, Option<DbPool>) =
        match config.database.backend {
            DatabaseBackend::Memory => (Arc::new(InMemoryProductRepository::new()), None),
            DatabaseBackend::Sqlite => {
                let pool = connect_with_settings(
                    &config.database.url,
                    config.database.max_connections,
                    config.database.timeout_secs,
                )
                .await
                .map_err(BootstrapError::DatabaseConnect)?;
                info!(
                    event_name = "system.bootstrap.database_connected",
                    correlation_id = "bootstrap",
                    "database connection established"
                );

                if let Err(error) = migrations::run_pending(&pool).await {
                    pool.close().await;
                    return Err(BootstrapError::Migration(error));
                }
                info!(
                    event_name = "system.bootstrap.migrations_applied",
                    correlation_id = "bootstrap",
                    "database migrations applied"
                );

                (Arc::new(SqlProductRepository::new(pool.clone())), Some(pool))
            }
        };

    if config.catalog.seed_on_startup {
        let seeded = CatalogSeed::load(products.as_ref()).await;
        match seeded {
            Ok(result) => info!(
                event_name = "system.bootstrap.catalog_seeded",
                correlation_id = "bootstrap",
                inserted = result.inserted,
                skipped_existing = result.skipped_existing,
                "catalog seed evaluated"
            ),
            Err(error) => {
                if let Some(pool) = &db_pool {
                    pool.close().await;
                }
                return Err(BootstrapError::Seed(error));
            }
        }
    }

    Ok(Application { config, products, db_pool })
}
