//! Data storage layer
//!
//! - `sqlite` - Embedded backend (default)
//! - `postgres` - Shared-server backend
//! - `types` - Row and filter types shared by both backends
//! - `traits` - `PaymentRepository`, the backend-agnostic read interface
//! - `error` - Unified error type for all backends

pub mod error;
pub mod postgres;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use postgres::PostgresService;
pub use sqlite::SqliteService;

pub use error::DataError;
pub use traits::PaymentRepository;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::{DatabaseBackend, PostgresConfig, SqliteConfig};
use crate::core::constants::SQLITE_DB_FILENAME;
use crate::core::storage::{AppStorage, DataSubdir};

/// Payments database service enum
///
/// Wraps the backend-specific service. Services are stored as `Arc` so the
/// repository handed out by [`PaymentsDatabase::repository`] can own a
/// reference to the pool.
pub enum PaymentsDatabase {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// PostgreSQL backend
    Postgres(Arc<PostgresService>),
}

impl PaymentsDatabase {
    /// Initialize the configured backend
    ///
    /// SQLite uses `sqlite.path` when set, else `<data dir>/sqlite/revenue.db`.
    /// PostgreSQL requires a `PostgresConfig`.
    pub async fn init(
        backend: DatabaseBackend,
        storage: &AppStorage,
        sqlite_config: &SqliteConfig,
        postgres_config: Option<&PostgresConfig>,
        debug: bool,
    ) -> Result<Self, DataError> {
        match backend {
            DatabaseBackend::Sqlite => {
                let db_path = sqlite_config.path.clone().unwrap_or_else(|| {
                    storage.subdir(DataSubdir::Sqlite).join(SQLITE_DB_FILENAME)
                });
                let service = SqliteService::init(&db_path, debug).await?;
                tracing::debug!(path = %db_path.display(), "Payments database ready");
                Ok(Self::Sqlite(Arc::new(service)))
            }
            DatabaseBackend::Postgres => {
                let config = postgres_config.ok_or_else(|| {
                    DataError::Config("PostgreSQL configuration required".to_string())
                })?;
                let service = PostgresService::init(config, debug).await?;
                Ok(Self::Postgres(Arc::new(service)))
            }
        }
    }

    /// Run a WAL checkpoint (SQLite); no-op for PostgreSQL
    pub async fn checkpoint(&self) -> Result<(), DataError> {
        match self {
            Self::Sqlite(s) => s.checkpoint().await.map_err(Into::into),
            Self::Postgres(_) => Ok(()),
        }
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Postgres(p) => p.close().await,
        }
    }

    /// Start the periodic maintenance task: WAL checkpoint for SQLite,
    /// health check for PostgreSQL
    pub fn start_checkpoint_task(&self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        match self {
            Self::Sqlite(s) => s.start_checkpoint_task(shutdown_rx),
            Self::Postgres(p) => p.start_health_check_task(shutdown_rx),
        }
    }

    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
            Self::Postgres(_) => DatabaseBackend::Postgres,
        }
    }

    /// Get the repository trait object for payment queries
    pub fn repository(&self) -> Box<dyn PaymentRepository + Send + Sync> {
        match self {
            Self::Sqlite(s) => Box::new(Arc::clone(s)),
            Self::Postgres(p) => Box::new(Arc::clone(p)),
        }
    }

    /// In-memory SQLite database for tests
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        Self::Sqlite(Arc::new(SqliteService::in_memory().await))
    }

    /// Underlying SQLite pool, for seeding test data
    #[cfg(test)]
    pub fn sqlite_pool(&self) -> &sqlx::SqlitePool {
        match self {
            Self::Sqlite(s) => s.pool(),
            Self::Postgres(_) => panic!("test database is SQLite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::payment::testing::seed_march_2024;
    use crate::data::types::RevenueFilter;

    #[tokio::test]
    async fn test_init_sqlite_with_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.db");
        let storage = AppStorage::init_for_test(dir.path().to_path_buf());
        let config = SqliteConfig {
            path: Some(path.clone()),
        };

        let db = PaymentsDatabase::init(DatabaseBackend::Sqlite, &storage, &config, None, false)
            .await
            .unwrap();
        assert_eq!(db.backend(), DatabaseBackend::Sqlite);
        assert!(path.exists());
        db.checkpoint().await.unwrap();
        db.close().await;
    }

    #[tokio::test]
    async fn test_init_postgres_requires_config() {
        let storage = AppStorage::init_for_test(std::env::temp_dir());
        let result = PaymentsDatabase::init(
            DatabaseBackend::Postgres,
            &storage,
            &SqliteConfig::default(),
            None,
            false,
        )
        .await;
        assert!(matches!(result, Err(DataError::Config(_))));
    }

    #[tokio::test]
    async fn test_repository_reads_through_trait_object() {
        let db = PaymentsDatabase::in_memory().await;
        seed_march_2024(db.sqlite_pool()).await;

        let totals = db
            .repository()
            .calculate_revenue(&RevenueFilter::new("completed", None, None))
            .await
            .unwrap();
        assert_eq!(totals.total_minor, 15_000);
        assert_eq!(totals.count, 2);
    }
}
