//! Shared data types for the payment database backends
//!
//! Row and parameter types used by both SQLite and PostgreSQL so the
//! repositories return identical shapes.

mod payment;

pub use payment::{
    CategoryRevenueRow, ListPaymentsParams, MonthRevenueRow, PaymentRow, RevenueFilter,
    RevenueTotals, row_count,
};
