//! Repository traits for database backends
//!
//! SQLite and PostgreSQL each implement [`PaymentRepository`] with their own
//! SQL dialect; callers only see this interface.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::{
    CategoryRevenueRow, ListPaymentsParams, MonthRevenueRow, PaymentRow, RevenueFilter,
    RevenueTotals,
};

/// Read-only access to the `payments` table
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    // ==================== Revenue Aggregates ====================

    /// Sum and count of payments matching the filter (single aggregate query)
    async fn calculate_revenue(&self, filter: &RevenueFilter) -> Result<RevenueTotals, DataError>;

    /// Same predicate as `calculate_revenue`, grouped by product category
    async fn revenue_by_category(
        &self,
        filter: &RevenueFilter,
    ) -> Result<Vec<CategoryRevenueRow>, DataError>;

    /// Per-month totals within one calendar year, ascending, empty months absent
    async fn revenue_by_month(
        &self,
        year: i32,
        status: &str,
    ) -> Result<Vec<MonthRevenueRow>, DataError>;

    // ==================== Payment Records ====================

    /// Page of payments ordered by `payment_date DESC`, plus the filtered total
    async fn list_payments(
        &self,
        params: &ListPaymentsParams,
    ) -> Result<(Vec<PaymentRow>, u64), DataError>;

    /// Single payment by primary key
    async fn get_payment(&self, id: i64) -> Result<Option<PaymentRow>, DataError>;
}
