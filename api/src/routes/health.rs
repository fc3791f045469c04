use crate::response::ApiResponse;
use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;
use util::{config, state::AppState};

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    project: String,
    env: String,
}

/// GET /api/health
///
/// ### Response
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "status": "ok", "project": "campus-connect", "env": "development" },
///   "message": "Health check passed"
/// }
/// ```
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success(
        HealthResponse {
            status: "ok",
            project: config::project_name(),
            env: config::env(),
        },
        "Health check passed",
    ))
}
