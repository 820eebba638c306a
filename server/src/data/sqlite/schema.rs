//! SQLite schema definitions
//!
//! The `payments` columns follow the table other systems already write:
//! `amount` is `NUMERIC(12,2)` and the timestamps are TEXT in whatever
//! layout the writer used. Range queries go through
//! `strftime('%Y-%m-%d %H:%M:%f', payment_date)`, which the `instant`
//! indexes cover.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- Payments (written by upstream systems, read by this service)
-- =============================================================================
CREATE TABLE IF NOT EXISTS payments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    transaction_id TEXT NOT NULL UNIQUE CHECK(length(transaction_id) <= 100),
    customer_id TEXT NOT NULL CHECK(length(customer_id) <= 100),
    customer_email TEXT NOT NULL CHECK(length(customer_email) <= 255),
    customer_name TEXT CHECK(customer_name IS NULL OR length(customer_name) <= 255),
    amount NUMERIC(12,2) NOT NULL,
    currency TEXT NOT NULL DEFAULT 'USD' CHECK(length(currency) = 3),
    payment_method TEXT NOT NULL CHECK(length(payment_method) <= 50),
    status TEXT NOT NULL DEFAULT 'completed' CHECK(length(status) <= 20),
    product_name TEXT CHECK(product_name IS NULL OR length(product_name) <= 255),
    product_category TEXT CHECK(product_category IS NULL OR length(product_category) <= 100),
    description TEXT,
    extra_data TEXT,
    payment_date TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_payments_payment_date ON payments(payment_date);
CREATE INDEX IF NOT EXISTS idx_payments_status ON payments(status);
CREATE INDEX IF NOT EXISTS idx_payments_product_category ON payments(product_category);
CREATE INDEX IF NOT EXISTS idx_payments_customer_id ON payments(customer_id);
CREATE INDEX IF NOT EXISTS idx_payments_amount ON payments(amount);
CREATE INDEX IF NOT EXISTS idx_payments_date_status ON payments(payment_date, status);
CREATE INDEX IF NOT EXISTS idx_payments_date_category ON payments(payment_date, product_category);
CREATE INDEX IF NOT EXISTS idx_payments_customer_date ON payments(customer_id, payment_date);
CREATE INDEX IF NOT EXISTS idx_payments_instant_status
    ON payments(strftime('%Y-%m-%d %H:%M:%f', payment_date), status);
"#;
