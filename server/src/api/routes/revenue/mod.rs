//! Revenue API endpoints

pub mod types;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::ValidatedQuery;
use crate::api::types::{ApiError, ErrorResponse};
use crate::domain::RevenueService;
use crate::domain::revenue::{CategoryBreakdown, MonthlyBreakdown, RevenueReport};

use types::{ByCategoryQuery, ByMonthQuery, CustomRangeQuery, LastNDaysQuery, StatusQuery};

/// Build Revenue API routes
pub fn routes(revenue: RevenueService) -> Router<()> {
    Router::new()
        .route("/total", get(total_revenue))
        .route("/this-month", get(this_month_revenue))
        .route("/year-to-date", get(year_to_date_revenue))
        .route("/custom-range", get(custom_range_revenue))
        .route("/last-n-days", get(last_n_days_revenue))
        .route("/by-category", get(revenue_by_category))
        .route("/by-month", get(revenue_by_month))
        .with_state(revenue)
}

/// Total revenue across all time
#[utoipa::path(
    get,
    path = "/api/v1/revenue/total",
    tag = "revenue",
    params(StatusQuery),
    responses(
        (status = 200, description = "All-time revenue", body = RevenueReport),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn total_revenue(
    State(revenue): State<RevenueService>,
    ValidatedQuery(query): ValidatedQuery<StatusQuery>,
) -> Result<Json<RevenueReport>, ApiError> {
    Ok(Json(revenue.total(&query.status).await?))
}

/// Revenue for the current calendar month (UTC)
#[utoipa::path(
    get,
    path = "/api/v1/revenue/this-month",
    tag = "revenue",
    params(StatusQuery),
    responses(
        (status = 200, description = "Month-to-date revenue", body = RevenueReport),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn this_month_revenue(
    State(revenue): State<RevenueService>,
    ValidatedQuery(query): ValidatedQuery<StatusQuery>,
) -> Result<Json<RevenueReport>, ApiError> {
    Ok(Json(revenue.this_month(&query.status).await?))
}

/// Revenue since January 1 of the current year (UTC)
#[utoipa::path(
    get,
    path = "/api/v1/revenue/year-to-date",
    tag = "revenue",
    params(StatusQuery),
    responses(
        (status = 200, description = "Year-to-date revenue", body = RevenueReport),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn year_to_date_revenue(
    State(revenue): State<RevenueService>,
    ValidatedQuery(query): ValidatedQuery<StatusQuery>,
) -> Result<Json<RevenueReport>, ApiError> {
    Ok(Json(revenue.year_to_date(&query.status).await?))
}

/// Revenue between two dates, both inclusive
///
/// A bare date as `end_date` means the first instant of that day.
#[utoipa::path(
    get,
    path = "/api/v1/revenue/custom-range",
    tag = "revenue",
    params(CustomRangeQuery),
    responses(
        (status = 200, description = "Revenue for the range", body = RevenueReport),
        (status = 400, description = "Malformed date or start after end", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn custom_range_revenue(
    State(revenue): State<RevenueService>,
    ValidatedQuery(query): ValidatedQuery<CustomRangeQuery>,
) -> Result<Json<RevenueReport>, ApiError> {
    Ok(Json(
        revenue
            .custom_range(&query.start_date, &query.end_date, &query.status)
            .await?,
    ))
}

/// Revenue over the trailing N days
#[utoipa::path(
    get,
    path = "/api/v1/revenue/last-n-days",
    tag = "revenue",
    params(LastNDaysQuery),
    responses(
        (status = 200, description = "Revenue for the trailing window", body = RevenueReport),
        (status = 400, description = "days is less than 1", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn last_n_days_revenue(
    State(revenue): State<RevenueService>,
    ValidatedQuery(query): ValidatedQuery<LastNDaysQuery>,
) -> Result<Json<RevenueReport>, ApiError> {
    Ok(Json(revenue.last_n_days(query.days, &query.status).await?))
}

/// Revenue grouped by product category
#[utoipa::path(
    get,
    path = "/api/v1/revenue/by-category",
    tag = "revenue",
    params(ByCategoryQuery),
    responses(
        (status = 200, description = "Revenue per category", body = CategoryBreakdown),
        (status = 400, description = "Malformed date or start after end", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn revenue_by_category(
    State(revenue): State<RevenueService>,
    ValidatedQuery(query): ValidatedQuery<ByCategoryQuery>,
) -> Result<Json<CategoryBreakdown>, ApiError> {
    Ok(Json(
        revenue
            .by_category(
                query.start_date.as_deref(),
                query.end_date.as_deref(),
                &query.status,
            )
            .await?,
    ))
}

/// Revenue per month for one year
#[utoipa::path(
    get,
    path = "/api/v1/revenue/by-month",
    tag = "revenue",
    params(ByMonthQuery),
    responses(
        (status = 200, description = "Revenue per month", body = MonthlyBreakdown),
        (status = 400, description = "Missing or out-of-range year", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn revenue_by_month(
    State(revenue): State<RevenueService>,
    ValidatedQuery(query): ValidatedQuery<ByMonthQuery>,
) -> Result<Json<MonthlyBreakdown>, ApiError> {
    Ok(Json(revenue.by_month(query.year, &query.status).await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDateTime;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::data::PaymentsDatabase;
    use crate::data::sqlite::repositories::payment::testing::seed_march_2024;
    use crate::utils::time::parse_datetime;

    fn march_25() -> NaiveDateTime {
        parse_datetime("2024-03-25T12:00:00").unwrap()
    }

    async fn app() -> Router {
        let db = Arc::new(PaymentsDatabase::in_memory().await);
        seed_march_2024(db.sqlite_pool()).await;
        routes(RevenueService::new(db).with_clock(march_25))
    }

    async fn fetch(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .await
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_total_defaults_to_completed() {
        let (status, body) = fetch("/total").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_revenue"], json!(150.0));
        assert_eq!(body["transaction_count"], 2);
        assert_eq!(body["period"], "all_time");
        assert_eq!(body["status_filter"], "completed");
        assert_eq!(body["currency"], "USD");
        assert!(body["start_date"].is_null());
    }

    #[tokio::test]
    async fn test_total_with_status() {
        let (_, body) = fetch("/total?status=pending").await;
        assert_eq!(body["total_revenue"], json!(30.0));
        assert_eq!(body["transaction_count"], 1);
    }

    #[tokio::test]
    async fn test_this_month_and_year_to_date() {
        let (_, body) = fetch("/this-month").await;
        assert_eq!(body["period"], "this_month_2024_3");
        assert_eq!(body["transaction_count"], 2);

        let (_, body) = fetch("/year-to-date").await;
        assert_eq!(body["period"], "year_to_date_2024");
        assert_eq!(body["start_date"], "2024-01-01T00:00:00");
        assert_eq!(body["total_revenue"], json!(150.0));
    }

    #[tokio::test]
    async fn test_custom_range() {
        let (status, body) = fetch("/custom-range?start_date=2024-03-01&end_date=2024-03-31").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["period"], "custom_range");
        assert_eq!(body["total_revenue"], json!(150.0));
        assert_eq!(body["transaction_count"], 2);
    }

    #[tokio::test]
    async fn test_custom_range_rejects_bad_date() {
        let (status, body) = fetch("/custom-range?start_date=03/01/2024&end_date=2024-03-31").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_DATE_FORMAT");
    }

    #[tokio::test]
    async fn test_custom_range_rejects_reversed_range() {
        let (status, body) = fetch("/custom-range?start_date=2024-04-01&end_date=2024-03-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_DATE_RANGE");
    }

    #[tokio::test]
    async fn test_custom_range_requires_both_dates() {
        let (status, body) = fetch("/custom-range?start_date=2024-03-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "QUERY_PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_last_n_days() {
        let (status, body) = fetch("/last-n-days?days=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["period"], "last_10_days");
        // Only 2024-03-20 falls within [03-15 12:00, 03-25 12:00]
        assert_eq!(body["total_revenue"], json!(50.0));
        assert_eq!(body["transaction_count"], 1);

        let (_, body) = fetch("/last-n-days").await;
        assert_eq!(body["period"], "last_30_days");
    }

    #[tokio::test]
    async fn test_last_n_days_rejects_zero() {
        let (status, body) = fetch("/last-n-days?days=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PARAMETER");
    }

    #[tokio::test]
    async fn test_by_category() {
        let (status, body) = fetch("/by-category").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["categories"]["uncategorized"]["revenue"], json!(100.0));
        assert_eq!(body["categories"]["books"]["revenue"], json!(50.0));
        assert_eq!(body["categories"]["books"]["transaction_count"], 1);
        assert_eq!(body["total_transactions"], 2);
        assert!(body["start_date"].is_null());
    }

    #[tokio::test]
    async fn test_by_category_echoes_dates() {
        let (_, body) =
            fetch("/by-category?start_date=2024-03-10&end_date=2024-03-31&status=pending").await;
        assert_eq!(body["start_date"], "2024-03-10");
        assert_eq!(body["categories"]["books"]["revenue"], json!(30.0));
        assert_eq!(body["status_filter"], "pending");
    }

    #[tokio::test]
    async fn test_by_month() {
        let (status, body) = fetch("/by-month?year=2024").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["year"], 2024);
        assert_eq!(body["months"]["3"]["revenue"], json!(150.0));
        assert_eq!(body["months"]["3"]["transaction_count"], 2);
        assert_eq!(body["months"].as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_by_month_requires_year() {
        let (status, body) = fetch("/by-month").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "QUERY_PARSE_ERROR");

        let (status, body) = fetch("/by-month?year=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PARAMETER");
    }
}
