use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use sqlx::SqlitePool;

use crate::content::fetch_presentation;
use crate::routes::retrieval_error;

pub fn presentation_routes() -> Router<SqlitePool> {
    Router::new().route("/api/presentation", get(get_presentation))
}

async fn get_presentation(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let presentation = fetch_presentation(&pool)
        .await
        .map_err(|e| retrieval_error("presentation", e))?;
    Ok(Json(presentation))
}
