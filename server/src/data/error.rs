//! Unified error type for data layer
//!
//! Wraps the SQLite and PostgreSQL error types so the domain layer sees one
//! error regardless of the configured backend.

use thiserror::Error;

use crate::data::postgres::PostgresError;
use crate::data::sqlite::SqliteError;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    #[error("PostgreSQL error: {0}")]
    Postgres(sqlx::Error),

    #[error("Migration {version} ({name}) failed on {backend}: {error}")]
    MigrationFailed {
        backend: &'static str,
        version: i32,
        name: String,
        error: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No connection became available within the acquire timeout
    #[error("Connection pool exhausted on {backend}")]
    PoolExhausted { backend: &'static str },
}

impl DataError {
    pub fn migration_failed(backend: &'static str, version: i32, name: &str, error: &str) -> Self {
        Self::MigrationFailed {
            backend,
            version,
            name: name.to_string(),
            error: error.to_string(),
        }
    }

    pub fn pool_exhausted(backend: &'static str) -> Self {
        Self::PoolExhausted { backend }
    }

    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::PoolExhausted { .. } => true,
            Self::Sqlite(e) | Self::Postgres(e) => {
                matches!(e, sqlx::Error::PoolClosed | sqlx::Error::Io(_))
            }
            _ => false,
        }
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
            Self::MigrationFailed { backend, .. } => backend,
            Self::PoolExhausted { backend } => backend,
            Self::Config(_) | Self::Io(_) => "unknown",
        }
    }
}

impl From<SqliteError> for DataError {
    fn from(e: SqliteError) -> Self {
        match e {
            SqliteError::Database(sqlx::Error::PoolTimedOut) => Self::pool_exhausted("sqlite"),
            SqliteError::Database(e) => Self::Sqlite(e),
            SqliteError::MigrationFailed {
                version,
                name,
                error,
            } => Self::MigrationFailed {
                backend: "sqlite",
                version,
                name,
                error,
            },
            SqliteError::Io(e) => Self::Io(e),
        }
    }
}

impl From<PostgresError> for DataError {
    fn from(e: PostgresError) -> Self {
        match e {
            PostgresError::Database(sqlx::Error::PoolTimedOut) => Self::pool_exhausted("postgres"),
            PostgresError::Database(e) => Self::Postgres(e),
            PostgresError::MigrationFailed {
                version,
                name,
                error,
            } => Self::MigrationFailed {
                backend: "postgres",
                version,
                name,
                error,
            },
            PostgresError::Config(msg) => Self::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_failed_error_display() {
        let err = DataError::migration_failed("postgres", 2, "add_refunds", "syntax error");
        assert_eq!(
            err.to_string(),
            "Migration 2 (add_refunds) failed on postgres: syntax error"
        );
    }

    #[test]
    fn test_pool_exhausted_error_display() {
        let err = DataError::pool_exhausted("postgres");
        assert_eq!(err.to_string(), "Connection pool exhausted on postgres");
    }

    #[test]
    fn test_pool_timeout_maps_to_pool_exhausted() {
        let err: DataError = SqliteError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, DataError::PoolExhausted { backend: "sqlite" }));
        assert!(err.is_transient());

        let err: DataError = PostgresError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.backend(), "postgres");
    }

    #[test]
    fn test_backend_method() {
        assert_eq!(DataError::Sqlite(sqlx::Error::RowNotFound).backend(), "sqlite");
        assert_eq!(
            DataError::Postgres(sqlx::Error::RowNotFound).backend(),
            "postgres"
        );
        assert_eq!(
            DataError::migration_failed("sqlite", 1, "test", "error").backend(),
            "sqlite"
        );
        assert_eq!(DataError::Config("x".into()).backend(), "unknown");
    }

    #[test]
    fn test_is_transient() {
        assert!(DataError::pool_exhausted("postgres").is_transient());
        assert!(DataError::Sqlite(sqlx::Error::PoolClosed).is_transient());
        assert!(!DataError::Sqlite(sqlx::Error::RowNotFound).is_transient());
        assert!(!DataError::Config("bad config".into()).is_transient());
    }

    #[test]
    fn test_postgres_config_error_converts() {
        let err: DataError = PostgresError::Config("missing host".into()).into();
        assert_eq!(err.to_string(), "Configuration error: missing host");
    }
}
