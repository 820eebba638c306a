//! Revenue API query types

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::core::constants::{DEFAULT_LAST_N_DAYS, DEFAULT_STATUS};

pub fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

fn default_days() -> i64 {
    DEFAULT_LAST_N_DAYS
}

/// Status filter shared by every revenue endpoint
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// Payment status to match exactly (default: completed)
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomRangeQuery {
    /// ISO 8601 date or datetime, inclusive
    pub start_date: String,
    /// ISO 8601 date or datetime, inclusive
    pub end_date: String,
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LastNDaysQuery {
    /// Trailing window length in days (default: 30, at least 1)
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ByCategoryQuery {
    /// Optional ISO 8601 lower bound
    pub start_date: Option<String>,
    /// Optional ISO 8601 upper bound
    pub end_date: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ByMonthQuery {
    /// Calendar year (1-9999)
    pub year: i32,
    #[serde(default = "default_status")]
    pub status: String,
}
