//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::health::HealthResponse;
use crate::api::routes::{health, payments, revenue};
use crate::api::types::ErrorResponse;
use crate::domain::revenue::{
    CategoryBreakdown, CategoryRevenue, MonthRevenue, MonthlyBreakdown, RevenueReport,
};
use crate::domain::{PaymentPage, PaymentRecord};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payment Revenue Tracker API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Revenue analytics over a payments table"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "revenue", description = "Revenue totals and breakdowns"),
        (name = "payments", description = "Payment records")
    ),
    paths(
        health::health,
        revenue::total_revenue,
        revenue::this_month_revenue,
        revenue::year_to_date_revenue,
        revenue::custom_range_revenue,
        revenue::last_n_days_revenue,
        revenue::revenue_by_category,
        revenue::revenue_by_month,
        payments::list_payments,
        payments::get_payment,
    ),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        RevenueReport,
        CategoryRevenue,
        CategoryBreakdown,
        MonthRevenue,
        MonthlyBreakdown,
        PaymentRecord,
        PaymentPage,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Revenue API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;
