//! Revenue report shapes returned by both the HTTP API and the MCP tools

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::core::constants::{DEFAULT_CURRENCY, UNCATEGORIZED};
use crate::data::types::{CategoryRevenueRow, MonthRevenueRow, RevenueTotals};
use crate::utils::time::to_iso;

use super::window::RevenueWindow;

/// Convert minor units (cents) to a two-decimal amount
pub fn minor_to_decimal(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

/// Total revenue for one window
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RevenueReport {
    #[schema(value_type = f64, example = 150.0)]
    pub total_revenue: Decimal,
    pub transaction_count: u64,
    /// `all_time`, `this_month_{y}_{m}`, `year_to_date_{y}`, `last_{n}_days` or `custom_range`
    pub period: String,
    /// Window start, ISO 8601 without offset (UTC)
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status_filter: String,
    pub currency: String,
}

impl RevenueReport {
    pub fn new(window: RevenueWindow, totals: RevenueTotals, status: &str) -> Self {
        Self {
            total_revenue: minor_to_decimal(totals.total_minor),
            transaction_count: totals.count,
            period: window.period,
            start_date: window.start.map(to_iso),
            end_date: window.end.map(to_iso),
            status_filter: status.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryRevenue {
    #[schema(value_type = f64)]
    pub revenue: Decimal,
    pub transaction_count: u64,
}

/// Revenue grouped by product category
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryBreakdown {
    /// Keyed by category; payments without one are under `uncategorized`
    pub categories: BTreeMap<String, CategoryRevenue>,
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
    pub total_transactions: u64,
    pub status_filter: String,
    /// Echo of the `start_date` argument as given
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl CategoryBreakdown {
    /// Fold grouped rows; NULL and a literal `uncategorized` share one bucket
    pub fn from_rows(
        rows: Vec<CategoryRevenueRow>,
        status: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Self {
        let mut minor: BTreeMap<String, (i64, u64)> = BTreeMap::new();
        for row in rows {
            let key = row.category.unwrap_or_else(|| UNCATEGORIZED.to_string());
            let entry = minor.entry(key).or_default();
            entry.0 += row.total_minor;
            entry.1 += row.count;
        }

        let total_minor = minor.values().map(|(total, _)| total).sum();
        let total_transactions = minor.values().map(|(_, count)| count).sum();
        let categories = minor
            .into_iter()
            .map(|(name, (total, count))| {
                (
                    name,
                    CategoryRevenue {
                        revenue: minor_to_decimal(total),
                        transaction_count: count,
                    },
                )
            })
            .collect();

        Self {
            categories,
            total_revenue: minor_to_decimal(total_minor),
            total_transactions,
            status_filter: status.to_string(),
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthRevenue {
    /// 1-12
    pub month: u32,
    #[schema(value_type = f64)]
    pub revenue: Decimal,
    pub transaction_count: u64,
}

/// Revenue per calendar month of one year
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyBreakdown {
    pub year: i32,
    /// Keyed by month number, ascending; months without payments are absent
    pub months: BTreeMap<u32, MonthRevenue>,
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
    pub total_transactions: u64,
    pub status_filter: String,
}

impl MonthlyBreakdown {
    pub fn from_rows(year: i32, rows: Vec<MonthRevenueRow>, status: &str) -> Self {
        let total_minor = rows.iter().map(|r| r.total_minor).sum();
        let total_transactions = rows.iter().map(|r| r.count).sum();
        let months = rows
            .into_iter()
            .map(|r| {
                (
                    r.month,
                    MonthRevenue {
                        month: r.month,
                        revenue: minor_to_decimal(r.total_minor),
                        transaction_count: r.count,
                    },
                )
            })
            .collect();

        Self {
            year,
            months,
            total_revenue: minor_to_decimal(total_minor),
            total_transactions,
            status_filter: status.to_string(),
        }
    }
}
