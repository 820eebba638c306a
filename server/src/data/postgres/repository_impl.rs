//! PaymentRepository trait implementation for PostgreSQL
//!
//! Implements the PaymentRepository trait for Arc<PostgresService>, delegating to
//! the free functions in `repositories::payment`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::traits::PaymentRepository;
use crate::data::types::{
    CategoryRevenueRow, ListPaymentsParams, MonthRevenueRow, PaymentRow, RevenueFilter,
    RevenueTotals,
};

use super::PostgresService;
use super::repositories::payment;

#[async_trait]
impl PaymentRepository for Arc<PostgresService> {
    // ==================== Revenue Aggregates ====================

    async fn calculate_revenue(&self, filter: &RevenueFilter) -> Result<RevenueTotals, DataError> {
        payment::calculate_revenue(self.pool(), filter)
            .await
            .map_err(Into::into)
    }

    async fn revenue_by_category(
        &self,
        filter: &RevenueFilter,
    ) -> Result<Vec<CategoryRevenueRow>, DataError> {
        payment::revenue_by_category(self.pool(), filter)
            .await
            .map_err(Into::into)
    }

    async fn revenue_by_month(
        &self,
        year: i32,
        status: &str,
    ) -> Result<Vec<MonthRevenueRow>, DataError> {
        payment::revenue_by_month(self.pool(), year, status)
            .await
            .map_err(Into::into)
    }

    // ==================== Payment Records ====================

    async fn list_payments(
        &self,
        params: &ListPaymentsParams,
    ) -> Result<(Vec<PaymentRow>, u64), DataError> {
        payment::list_payments(self.pool(), params)
            .await
            .map_err(Into::into)
    }

    async fn get_payment(&self, id: i64) -> Result<Option<PaymentRow>, DataError> {
        payment::get_payment(self.pool(), id)
            .await
            .map_err(Into::into)
    }
}
