//! Revenue query errors

use thiserror::Error;

use crate::data::DataError;
use crate::utils::time::DateFormatError;

#[derive(Error, Debug)]
pub enum RevenueError {
    /// Date text outside the accepted ISO 8601 forms
    #[error("Invalid date format. Use ISO format: {0}")]
    DateFormat(#[from] DateFormatError),

    #[error("start_date must be before end_date")]
    RangeOrder,

    #[error("{name} {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error(transparent)]
    Data(#[from] DataError),
}

impl RevenueError {
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Caller supplied bad input (as opposed to a storage failure)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Data(_))
    }
}
