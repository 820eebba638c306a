//! Domain logic for payment revenue analytics
//!
//! - `revenue` - Revenue windows, aggregation and report shaping
//! - `payments` - Individual payment lookup and listing

pub mod payments;
pub mod revenue;

pub use payments::{PaymentPage, PaymentRecord, PaymentService};
pub use revenue::{RevenueError, RevenueService};
