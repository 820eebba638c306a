// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Revenue";

/// Crate name as it appears in tracing targets
pub const APP_LOG_TARGET: &str = "revenue_server";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".revenue";

/// Name reported by the MCP server
pub const MCP_SERVER_NAME: &str = "Payment Revenue Tracker";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "revenue.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "REVENUE_CONFIG";

// =============================================================================
// Environment Variables - Debug / Logging
// =============================================================================

/// Environment variable for debug mode (SQL statements logged at debug level)
pub const ENV_DEBUG: &str = "REVENUE_DEBUG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "REVENUE_LOG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "REVENUE_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "REVENUE_PORT";

/// Environment variable for MCP server enabled
pub const ENV_MCP_ENABLED: &str = "REVENUE_MCP_ENABLED";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default body limit for API requests (64 KB, the API is read-only)
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Maximum time to wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "REVENUE_DATA_DIR";

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Database backend (sqlite or postgres)
pub const ENV_DATABASE_BACKEND: &str = "REVENUE_DATABASE_BACKEND";

/// Explicit SQLite database path
pub const ENV_SQLITE_PATH: &str = "REVENUE_SQLITE_PATH";

/// Full PostgreSQL URL (takes precedence over the individual parts)
pub const ENV_POSTGRES_URL: &str = "REVENUE_POSTGRES_URL";

pub const ENV_DATABASE_HOST: &str = "DATABASE_HOST";
pub const ENV_DATABASE_PORT: &str = "DATABASE_PORT";
pub const ENV_DATABASE_USER: &str = "DATABASE_USER";
pub const ENV_DATABASE_PASSWORD: &str = "DATABASE_PASSWORD";
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "revenue.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -64000 = 64MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// PostgreSQL Database
// =============================================================================

pub const POSTGRES_DEFAULT_HOST: &str = "localhost";
pub const POSTGRES_DEFAULT_PORT: u16 = 5432;
pub const POSTGRES_DEFAULT_USER: &str = "postgres";
pub const POSTGRES_DEFAULT_DATABASE: &str = "payments";

/// Steady pool size
pub const POSTGRES_DEFAULT_POOL_SIZE: u32 = 10;

/// Connections allowed above the pool size under load
pub const POSTGRES_DEFAULT_MAX_OVERFLOW: u32 = 20;

/// Connection acquire timeout in seconds
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Idle connection timeout in seconds
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Max connection lifetime in seconds
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Statement timeout in seconds
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 30;

/// Interval between `SELECT 1` pings
pub const POSTGRES_HEALTH_CHECK_INTERVAL_SECS: u64 = 60;

// =============================================================================
// Revenue Queries
// =============================================================================

/// Status matched when the caller does not pass one
pub const DEFAULT_STATUS: &str = "completed";

/// Currency reported on revenue responses
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default window for last-N-days
pub const DEFAULT_LAST_N_DAYS: i64 = 30;

/// Bucket for payments without a product category
pub const UNCATEGORIZED: &str = "uncategorized";
