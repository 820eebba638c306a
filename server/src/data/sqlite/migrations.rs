//! Database migration system
//!
//! Handles schema versioning. Version 1 is the initial schema.

use sqlx::SqlitePool;

use super::error::SqliteError;
use super::schema::{SCHEMA, SCHEMA_VERSION};
use crate::utils::crypto::sha256_hex;

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteError> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
    )
    .fetch_one(pool)
    .await?;

    let current_version: Option<i32> = if table_exists {
        sqlx::query_scalar("SELECT version FROM schema_version WHERE id = 1")
            .fetch_optional(pool)
            .await?
    } else {
        None
    };

    match current_version {
        None => {
            tracing::debug!(
                "Initializing database with schema version {}",
                SCHEMA_VERSION
            );
            apply_initial_schema(pool).await
        }
        Some(v) if v > SCHEMA_VERSION => {
            tracing::warn!(
                "SQLite schema version {} is newer than application version {}",
                v,
                SCHEMA_VERSION
            );
            Ok(())
        }
        Some(v) if v < SCHEMA_VERSION => Err(SqliteError::MigrationFailed {
            version: v + 1,
            name: "unknown".to_string(),
            error: format!("No migration defined from version {}", v),
        }),
        Some(v) => {
            tracing::debug!("Database schema is up to date (version {})", v);
            Ok(())
        }
    }
}

/// Apply the initial schema (version 1)
async fn apply_initial_schema(pool: &SqlitePool) -> Result<(), SqliteError> {
    let start = std::time::Instant::now();

    let mut tx = pool.begin().await?;

    sqlx::query(SCHEMA)
        .execute(&mut *tx)
        .await
        .map_err(|e| SqliteError::MigrationFailed {
            version: SCHEMA_VERSION,
            name: "initial_schema".to_string(),
            error: e.to_string(),
        })?;

    let now = chrono::Utc::now().timestamp();
    sqlx::query(
        "INSERT INTO schema_version (id, version, applied_at, description) VALUES (1, ?, ?, 'Initial schema')",
    )
    .bind(SCHEMA_VERSION)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let checksum = sha256_hex(SCHEMA);
    let elapsed_ms = start.elapsed().as_millis() as i64;
    sqlx::query(
        "INSERT INTO schema_migrations (version, name, applied_at, checksum, execution_time_ms, success) VALUES (?, ?, ?, ?, ?, 1)",
    )
    .bind(SCHEMA_VERSION)
    .bind("initial_schema")
    .bind(now)
    .bind(&checksum)
    .bind(elapsed_ms)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!("Applied initial schema in {}ms", elapsed_ms);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_fresh_database_gets_initial_schema() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.unwrap();

        let version: i32 = sqlx::query_scalar("SELECT version FROM schema_version WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);

        let checksum: String =
            sqlx::query_scalar("SELECT checksum FROM schema_migrations WHERE version = ?")
                .bind(SCHEMA_VERSION)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(checksum, sha256_hex(SCHEMA));

        let payments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(payments, 0);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_older_version_without_migration_fails() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.unwrap();
        sqlx::query("UPDATE schema_version SET version = 0 WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let err = run_migrations(&pool).await.unwrap_err();
        assert!(matches!(err, SqliteError::MigrationFailed { version: 1, .. }));
    }
}
