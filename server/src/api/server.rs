//! API server initialization

use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{health, payments, revenue};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::domain::{PaymentService, RevenueService};

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Serve until shutdown; returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();
        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(host.parse()?, port);

        let revenue = RevenueService::new(app.database.clone());
        let payments = PaymentService::new(app.database.clone());

        let mcp = if app.config.mcp.enabled {
            let ct = super::mcp::cancellation_token_from_shutdown(&shutdown);
            Some(super::mcp::service(revenue.clone(), ct))
        } else {
            tracing::debug!("MCP server disabled by config");
            None
        };

        let router = build_router(revenue, payments);
        let router = if let Some(mcp) = mcp {
            router.nest_service("/mcp", mcp)
        } else {
            router
        };

        let router = router
            .fallback(middleware::handle_404)
            .layer(CompressionLayer::new())
            .layer(middleware::cors(&allowed_origins))
            .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
            .layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            address = %addr,
            backend = %app.database.backend(),
            mcp = app.config.mcp.enabled,
            "Server listening"
        );

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

/// Application routes without transport layers
fn build_router(revenue: RevenueService, payments: PaymentService) -> Router<()> {
    Router::new()
        .route("/", get(health::root))
        .route("/api/v1/health", get(health::health))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .nest("/api/v1/revenue", revenue::routes(revenue))
        .nest("/api/v1/payments", payments::routes(payments))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::data::PaymentsDatabase;
    use crate::data::sqlite::repositories::payment::testing::seed_march_2024;

    async fn router() -> Router {
        let db = Arc::new(PaymentsDatabase::in_memory().await);
        seed_march_2024(db.sqlite_pool()).await;
        build_router(RevenueService::new(db.clone()), PaymentService::new(db))
            .fallback(middleware::handle_404)
    }

    async fn fetch(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router()
            .await
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_root_says_hello() {
        let (status, body) = fetch("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Hello World!");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = fetch("/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_nested_routes_are_mounted() {
        let (status, _) = fetch("/api/v1/revenue/total").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = fetch("/api/v1/payments?limit=2").await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["payments"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_openapi_and_docs() {
        let (status, body) = fetch("/api/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["paths"]["/api/v1/revenue/by-month"].is_object());

        let (status, _) = fetch("/api/docs").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = fetch("/api/v1/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
