//! Shared API types: error responses and pagination limits

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::ValidationError;

use crate::data::DataError;
use crate::domain::RevenueError;

/// Maximum page size for list endpoints
pub const MAX_PAGE_LIMIT: u32 = 500;

/// Default page size for list endpoints
pub const DEFAULT_LIMIT: u32 = 50;

pub fn validate_limit(limit: u32) -> Result<(), ValidationError> {
    if limit == 0 || limit > MAX_PAGE_LIMIT {
        return Err(ValidationError::new("limit_range")
            .with_message(format!("Limit must be between 1 and {}", MAX_PAGE_LIMIT).into()));
    }
    Ok(())
}

pub fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// `bad_request`, `not_found` or `internal_error`
    pub error: String,
    /// Machine-readable code, e.g. `INVALID_DATE_FORMAT`
    pub code: String,
    pub message: String,
}

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: &'static str, message: String },
    NotFound { code: &'static str, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Log the storage failure and hide its details from the caller
    pub fn from_data(e: DataError) -> Self {
        tracing::error!(error = %e, backend = e.backend(), "Data error");
        Self::internal("Database operation failed")
    }
}

impl From<RevenueError> for ApiError {
    fn from(e: RevenueError) -> Self {
        match e {
            RevenueError::DateFormat(_) => Self::bad_request("INVALID_DATE_FORMAT", e.to_string()),
            RevenueError::RangeOrder => Self::bad_request("INVALID_DATE_RANGE", e.to_string()),
            RevenueError::InvalidParameter { .. } => {
                Self::bad_request("INVALID_PARAMETER", e.to_string())
            }
            RevenueError::Data(e) => Self::from_data(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL",
                message,
            ),
        };

        (
            status,
            Json(json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::parse_datetime;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validate_limit_bounds() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(MAX_PAGE_LIMIT).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(MAX_PAGE_LIMIT + 1).is_err());
        assert_eq!(default_limit(), 50);
    }

    #[tokio::test]
    async fn test_date_format_maps_to_400() {
        let err: RevenueError = parse_datetime("yesterday").unwrap_err().into();
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "bad_request");
        assert_eq!(body["code"], "INVALID_DATE_FORMAT");
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid date format. Use ISO format")
        );
    }

    #[tokio::test]
    async fn test_range_order_maps_to_400() {
        let response = ApiError::from(RevenueError::RangeOrder).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_DATE_RANGE");
        assert_eq!(body["message"], "start_date must be before end_date");
    }

    #[tokio::test]
    async fn test_data_error_hides_details() {
        let err = RevenueError::Data(DataError::Config("password=hunter2".into()));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["code"], "INTERNAL");
        assert_eq!(body["message"], "Database operation failed");
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ApiError::not_found("NOT_FOUND", "Payment 7 not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "Payment 7 not found");
    }
}
