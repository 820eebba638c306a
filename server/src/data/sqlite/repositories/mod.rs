//! SQLite repositories
//!
//! Row types are imported from `crate::data::types`.

pub mod payment;

pub use payment::{
    calculate_revenue, get_payment, list_payments, revenue_by_category, revenue_by_month,
};
