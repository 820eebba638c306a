//! Payments API query types

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::api::types::{default_limit, validate_limit};
use crate::data::types::ListPaymentsParams;

/// Query params for listing payments
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPaymentsQuery {
    /// Page size (default: 50, max: 500)
    #[serde(default = "default_limit")]
    #[validate(custom(function = "validate_limit"))]
    pub limit: u32,

    /// Rows to skip
    #[serde(default)]
    pub offset: u32,

    /// Exact status match; all statuses when absent
    pub status: Option<String>,

    pub customer_id: Option<String>,
}

impl From<ListPaymentsQuery> for ListPaymentsParams {
    fn from(query: ListPaymentsQuery) -> Self {
        Self {
            limit: query.limit,
            offset: query.offset,
            status: query.status,
            customer_id: query.customer_id,
        }
    }
}
