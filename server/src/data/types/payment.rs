//! Payment rows and revenue aggregate results

use chrono::NaiveDateTime;

// ============================================================================
// Payment records
// ============================================================================

/// Payment row from database
///
/// `amount_minor` holds the stored `NUMERIC(12,2)` amount in minor units
/// (cents). The table is written by other systems; this service only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRow {
    pub id: i64,
    pub transaction_id: String,
    pub customer_id: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub amount_minor: i64,
    pub currency: String,
    pub payment_method: String,
    pub status: String,
    pub product_name: Option<String>,
    pub product_category: Option<String>,
    pub description: Option<String>,
    pub extra_data: Option<String>,
    pub payment_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Filters for listing payments, newest first
#[derive(Debug, Clone)]
pub struct ListPaymentsParams {
    pub limit: u32,
    pub offset: u32,
    pub status: Option<String>,
    pub customer_id: Option<String>,
}

// ============================================================================
// Revenue aggregates
// ============================================================================

/// Predicate shared by the revenue aggregates
///
/// Both bounds are inclusive and already normalized to UTC wall clock.
/// `None` leaves that side of the window open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueFilter {
    pub status: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl RevenueFilter {
    pub fn new(
        status: impl Into<String>,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            status: status.into(),
            start,
            end,
        }
    }
}

/// Sum and count of matching payments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevenueTotals {
    pub total_minor: i64,
    pub count: u64,
}

/// One `GROUP BY product_category` row; `None` is the NULL category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRevenueRow {
    pub category: Option<String>,
    pub total_minor: i64,
    pub count: u64,
}

/// One month of a calendar year (1-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRevenueRow {
    pub month: u32,
    pub total_minor: i64,
    pub count: u64,
}

/// `COUNT(*)` as decoded by sqlx; never negative in practice
pub fn row_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
