//! Payment record endpoints

pub mod types;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedQuery};
use crate::api::types::{ApiError, ErrorResponse};
use crate::domain::{PaymentPage, PaymentRecord, PaymentService};

use types::ListPaymentsQuery;

/// Build Payments API routes
pub fn routes(payments: PaymentService) -> Router<()> {
    Router::new()
        .route("/", get(list_payments))
        .route("/{id}", get(get_payment))
        .with_state(payments)
}

/// List payments, newest first
#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "payments",
    params(ListPaymentsQuery),
    responses(
        (status = 200, description = "Page of payments", body = PaymentPage),
        (status = 400, description = "Invalid limit or offset", body = ErrorResponse)
    )
)]
pub async fn list_payments(
    State(payments): State<PaymentService>,
    ValidatedQuery(query): ValidatedQuery<ListPaymentsQuery>,
) -> Result<Json<PaymentPage>, ApiError> {
    let page = payments
        .list(query.into())
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(page))
}

/// Get a payment by id
#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    tag = "payments",
    params(("id" = i64, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment", body = PaymentRecord),
        (status = 404, description = "No payment with this id", body = ErrorResponse)
    )
)]
pub async fn get_payment(
    State(payments): State<PaymentService>,
    IdPath(id): IdPath,
) -> Result<Json<PaymentRecord>, ApiError> {
    payments
        .get(id)
        .await
        .map_err(ApiError::from_data)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("NOT_FOUND", format!("Payment {} not found", id)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::data::PaymentsDatabase;
    use crate::data::sqlite::repositories::payment::testing::{
        SeedPayment, insert_payment, seed_march_2024,
    };

    async fn fetch(db: &Arc<PaymentsDatabase>, uri: &str) -> (StatusCode, Value) {
        let response = routes(PaymentService::new(db.clone()))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn seeded() -> Arc<PaymentsDatabase> {
        let db = Arc::new(PaymentsDatabase::in_memory().await);
        seed_march_2024(db.sqlite_pool()).await;
        db
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = seeded().await;
        let (status, body) = fetch(&db, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["limit"], 50);
        assert_eq!(body["offset"], 0);

        let ids: Vec<&str> = body["payments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["transaction_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["txn_2", "txn_3", "txn_1"]);
    }

    #[tokio::test]
    async fn test_list_filters_and_pages() {
        let db = seeded().await;
        insert_payment(
            db.sqlite_pool(),
            &SeedPayment::new("txn_4", 700, "completed", None, "2024-04-01").customer("cus_9"),
        )
        .await;

        let (_, body) = fetch(&db, "/?status=completed&limit=1&offset=1").await;
        assert_eq!(body["total"], 3);
        assert_eq!(body["payments"][0]["transaction_id"], "txn_2");

        let (_, body) = fetch(&db, "/?customer_id=cus_9").await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["payments"][0]["amount"], json!(7.0));
    }

    #[tokio::test]
    async fn test_list_rejects_limit_out_of_range() {
        let db = seeded().await;
        let (status, body) = fetch(&db, "/?limit=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Limit must be between 1 and 500");

        let (status, _) = fetch(&db, "/?limit=501").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_payment() {
        let db = Arc::new(PaymentsDatabase::in_memory().await);
        let id = insert_payment(
            db.sqlite_pool(),
            &SeedPayment::new("txn_9", 1_250, "refunded", Some("games"), "2024-05-01T08:30:00"),
        )
        .await;

        let (status, body) = fetch(&db, &format!("/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transaction_id"], "txn_9");
        assert_eq!(body["amount"], json!(12.5));
        assert_eq!(body["status"], "refunded");
        assert_eq!(body["payment_date"], "2024-05-01T08:30:00");
    }

    #[tokio::test]
    async fn test_get_missing_payment_is_404() {
        let db = seeded().await;
        let (status, body) = fetch(&db, "/9999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_is_400() {
        let db = seeded().await;
        let (status, body) = fetch(&db, "/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "PATH_PARSE_ERROR");
    }
}
