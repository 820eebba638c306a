//! Revenue analytics over the payments table
//!
//! `RevenueService` turns raw caller input (status, date text, day counts,
//! years) into a [`RevenueFilter`], runs one aggregate query through the
//! configured [`PaymentRepository`](crate::data::PaymentRepository), and shapes
//! the result into a report. Both the HTTP routes and the MCP tools call it.

mod error;
mod report;
mod window;

pub use error::RevenueError;
pub use report::{
    CategoryBreakdown, CategoryRevenue, MonthRevenue, MonthlyBreakdown, RevenueReport,
    minor_to_decimal,
};
pub use window::{RevenueWindow, ensure_ordered};

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::data::PaymentsDatabase;
use crate::data::types::RevenueFilter;
use crate::utils::time::{parse_optional_datetime, utc_now};

#[derive(Clone)]
pub struct RevenueService {
    database: Arc<PaymentsDatabase>,
    clock: fn() -> NaiveDateTime,
}

impl RevenueService {
    pub fn new(database: Arc<PaymentsDatabase>) -> Self {
        Self {
            database,
            clock: utc_now,
        }
    }

    /// Replace the UTC clock used for the relative windows
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Revenue over every payment with the given status
    pub async fn total(&self, status: &str) -> Result<RevenueReport, RevenueError> {
        self.report(RevenueWindow::all_time(), status).await
    }

    /// Revenue from the first instant of the current UTC month until now
    pub async fn this_month(&self, status: &str) -> Result<RevenueReport, RevenueError> {
        self.report(RevenueWindow::this_month((self.clock)()), status)
            .await
    }

    /// Revenue from January 1 of the current UTC year until now
    pub async fn year_to_date(&self, status: &str) -> Result<RevenueReport, RevenueError> {
        self.report(RevenueWindow::year_to_date((self.clock)()), status)
            .await
    }

    /// Revenue over the trailing `days` days (at least 1)
    pub async fn last_n_days(
        &self,
        days: i64,
        status: &str,
    ) -> Result<RevenueReport, RevenueError> {
        let window = RevenueWindow::last_n_days((self.clock)(), days)?;
        self.report(window, status).await
    }

    /// Revenue between two ISO 8601 dates, both inclusive
    pub async fn custom_range(
        &self,
        start_date: &str,
        end_date: &str,
        status: &str,
    ) -> Result<RevenueReport, RevenueError> {
        let window = RevenueWindow::custom_range(start_date, end_date)?;
        self.report(window, status).await
    }

    /// Revenue grouped by product category within an optional window
    pub async fn by_category(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
        status: &str,
    ) -> Result<CategoryBreakdown, RevenueError> {
        let start = parse_optional_datetime(start_date)?;
        let end = parse_optional_datetime(end_date)?;
        ensure_ordered(start, end)?;

        let filter = RevenueFilter::new(status, start, end);
        let rows = self
            .database
            .repository()
            .revenue_by_category(&filter)
            .await?;

        tracing::debug!(
            status = %status,
            groups = rows.len(),
            "Computed revenue by category"
        );
        Ok(CategoryBreakdown::from_rows(
            rows, status, start_date, end_date,
        ))
    }

    /// Revenue per month of one calendar year (1..=9999)
    pub async fn by_month(&self, year: i32, status: &str) -> Result<MonthlyBreakdown, RevenueError> {
        if !(1..=9999).contains(&year) {
            return Err(RevenueError::invalid_parameter(
                "year",
                "must be between 1 and 9999",
            ));
        }

        let rows = self
            .database
            .repository()
            .revenue_by_month(year, status)
            .await?;

        tracing::debug!(year, status = %status, months = rows.len(), "Computed revenue by month");
        Ok(MonthlyBreakdown::from_rows(year, rows, status))
    }

    async fn report(
        &self,
        window: RevenueWindow,
        status: &str,
    ) -> Result<RevenueReport, RevenueError> {
        let filter = RevenueFilter::new(status, window.start, window.end);
        let totals = self
            .database
            .repository()
            .calculate_revenue(&filter)
            .await?;

        tracing::debug!(
            period = %window.period,
            status = %status,
            count = totals.count,
            "Computed revenue"
        );
        Ok(RevenueReport::new(window, totals, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::payment::testing::{
        SeedPayment, insert_payment, seed_march_2024,
    };
    use crate::utils::time::parse_datetime;

    fn march_25() -> NaiveDateTime {
        parse_datetime("2024-03-25T12:00:00").unwrap()
    }

    async fn service() -> RevenueService {
        let db = Arc::new(PaymentsDatabase::in_memory().await);
        seed_march_2024(db.sqlite_pool()).await;
        RevenueService::new(db).with_clock(march_25)
    }

    #[tokio::test]
    async fn test_total_all_time() {
        let report = service().await.total("completed").await.unwrap();
        assert_eq!(report.total_revenue, minor_to_decimal(15_000));
        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.period, "all_time");
        assert!(report.start_date.is_none());
        assert_eq!(report.currency, "USD");
    }

    #[tokio::test]
    async fn test_total_other_status() {
        let report = service().await.total("pending").await.unwrap();
        assert_eq!(report.total_revenue, minor_to_decimal(3_000));
        assert_eq!(report.status_filter, "pending");
    }

    #[tokio::test]
    async fn test_this_month_uses_clock() {
        let report = service().await.this_month("completed").await.unwrap();
        assert_eq!(report.period, "this_month_2024_3");
        assert_eq!(report.start_date.as_deref(), Some("2024-03-01T00:00:00"));
        assert_eq!(report.end_date.as_deref(), Some("2024-03-25T12:00:00"));
        assert_eq!(report.total_revenue, minor_to_decimal(15_000));
    }

    #[tokio::test]
    async fn test_year_to_date() {
        let report = service().await.year_to_date("completed").await.unwrap();
        assert_eq!(report.period, "year_to_date_2024");
        assert_eq!(report.transaction_count, 2);
    }

    #[tokio::test]
    async fn test_last_n_days() {
        let svc = service().await;

        // 2024-03-15T12:00 onwards: only the 03-20 payment
        let report = svc.last_n_days(10, "completed").await.unwrap();
        assert_eq!(report.period, "last_10_days");
        assert_eq!(report.total_revenue, minor_to_decimal(5_000));

        let err = svc.last_n_days(0, "completed").await.unwrap_err();
        assert!(matches!(err, RevenueError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn test_custom_range() {
        let svc = service().await;
        let report = svc
            .custom_range("2024-03-01", "2024-03-31T23:59:59", "completed")
            .await
            .unwrap();
        assert_eq!(report.total_revenue, minor_to_decimal(15_000));
        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.period, "custom_range");

        let err = svc
            .custom_range("2024-04-01", "2024-03-01", "pending")
            .await
            .unwrap_err();
        assert!(matches!(err, RevenueError::RangeOrder));
    }

    #[tokio::test]
    async fn test_by_category() {
        let breakdown = service()
            .await
            .by_category(Some("2024-03-01"), Some("2024-03-31"), "completed")
            .await
            .unwrap();
        assert_eq!(breakdown.categories.len(), 2);
        assert_eq!(
            breakdown.categories["uncategorized"].revenue,
            minor_to_decimal(10_000)
        );
        assert_eq!(
            breakdown.categories["books"].revenue,
            minor_to_decimal(5_000)
        );
        assert_eq!(breakdown.total_transactions, 2);
        assert_eq!(breakdown.start_date.as_deref(), Some("2024-03-01"));
    }

    #[tokio::test]
    async fn test_by_category_validates_dates() {
        let svc = service().await;
        let err = svc
            .by_category(Some("03/01/2024"), None, "completed")
            .await
            .unwrap_err();
        assert!(matches!(err, RevenueError::DateFormat(_)));

        let err = svc
            .by_category(Some("2024-05-01"), Some("2024-03-01"), "completed")
            .await
            .unwrap_err();
        assert!(matches!(err, RevenueError::RangeOrder));
    }

    #[tokio::test]
    async fn test_by_month() {
        let svc = service().await;
        let breakdown = svc.by_month(2024, "completed").await.unwrap();
        assert_eq!(breakdown.months.len(), 1);
        let march = &breakdown.months[&3];
        assert_eq!(march.month, 3);
        assert_eq!(march.revenue, minor_to_decimal(15_000));
        assert_eq!(march.transaction_count, 2);
        assert_eq!(breakdown.total_revenue, minor_to_decimal(15_000));

        let err = svc.by_month(0, "completed").await.unwrap_err();
        assert!(matches!(err, RevenueError::InvalidParameter { name: "year", .. }));
    }

    #[tokio::test]
    async fn test_month_sum_matches_year_total() {
        let db = Arc::new(PaymentsDatabase::in_memory().await);
        for (i, date) in ["2023-01-10", "2023-06-30T23:59:59", "2023-12-31T23:59:59"]
            .iter()
            .enumerate()
        {
            let tx = format!("txn_{}", i);
            insert_payment(
                db.sqlite_pool(),
                &SeedPayment::new(&tx, 1_000 * (i as i64 + 1), "completed", None, date),
            )
            .await;
        }
        let svc = RevenueService::new(db);

        let months = svc.by_month(2023, "completed").await.unwrap();
        let year = svc
            .custom_range("2023-01-01", "2023-12-31T23:59:59", "completed")
            .await
            .unwrap();
        assert_eq!(months.total_revenue, year.total_revenue);
        assert_eq!(months.total_transactions, year.transaction_count);
    }
}
