use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use sqlx::SqlitePool;

use crate::content::{fetch_references, fetch_sections, fetch_whitepaper};
use crate::routes::retrieval_error;

pub fn whitepaper_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/api/whitepaper", get(get_whitepaper))
        .route("/api/whitepaper/sections", get(get_whitepaper_sections))
        .route("/api/whitepaper/references", get(get_references))
}

async fn get_whitepaper(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let paper = fetch_whitepaper(&pool)
        .await
        .map_err(|e| retrieval_error("white paper", e))?;
    Ok(Json(paper))
}

async fn get_whitepaper_sections(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let sections = fetch_sections(&pool)
        .await
        .map_err(|e| retrieval_error("sections", e))?;
    Ok(Json(sections))
}

async fn get_references(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let references = fetch_references(&pool)
        .await
        .map_err(|e| retrieval_error("references", e))?;
    Ok(Json(references))
}
