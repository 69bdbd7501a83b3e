pub mod presentation;
pub mod whitepaper;

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::db::StoreError;

pub use presentation::presentation_routes;
pub use whitepaper::whitepaper_routes;

pub const API_NAME: &str = "THPU White Paper API";
pub const API_VERSION: &str = "1.0.0";

/// The full application: API routes, permissive CORS and request tracing.
pub fn build_app(pool: SqlitePool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/", get(api_root))
        .route("/api/health", get(health_check))
        .merge(whitepaper_routes())
        .merge(presentation_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(pool)
}

async fn api_root() -> impl IntoResponse {
    Json(serde_json::json!({"message": API_NAME, "version": API_VERSION}))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({"status": "healthy"}))
}

/// Logs the cause and answers with a generic 500; store details stay server-side.
pub(crate) fn retrieval_error(what: &str, error: StoreError) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!("Error getting {}: {}", what, error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"detail": format!("Error retrieving {}", what)})),
    )
}
