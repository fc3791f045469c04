use super::common::{LikeResponse, MemoryResponse, UploadMemoriesRequest};
use crate::auth::AuthUser;
use crate::response::{Reply, fail, from_service_error, ok};
use crate::routes::common::format_validation_errors;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use services::memory::{MemoryService, UploadMemories};
use util::state::AppState;
use validator::Validate;

/// POST /api/memories
///
/// ### Request Body
/// ```json
/// {
///   "event_id": 3,
///   "title": "Annual day",
///   "album": "Annual Day 2025",
///   "files": ["stage.jpg", "crowd.png"]
/// }
/// ```
///
/// One memory per image file name (`png`, `jpg`, `jpeg`, `gif`, `webp`);
/// other names are skipped.
///
/// ### Responses
/// - `201 Created` with the stored memories
/// - `400 Bad Request` when no file is an image
/// - `404 Not Found` for an unknown `event_id`
pub async fn upload_memories(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<UploadMemoriesRequest>,
) -> Reply<Vec<MemoryResponse>> {
    if let Err(e) = req.validate() {
        return fail(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let params = UploadMemories {
        event_id: req.event_id,
        title: req.title.trim().to_string(),
        description: req.description,
        album: req.album,
        files: req.files,
    };

    match MemoryService::upload(app_state.db(), claims.context(), params, Utc::now()).await {
        Ok(memories) => {
            let n = memories.len();
            ok(
                StatusCode::CREATED,
                memories.into_iter().map(MemoryResponse::from).collect(),
                format!("{n} photo(s) uploaded"),
            )
        }
        Err(e) => from_service_error(e),
    }
}

/// POST /api/memories/{memory_id}/like
///
/// Toggles the caller's like and returns the new state.
pub async fn toggle_like(
    State(app_state): State<AppState>,
    Path(memory_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<LikeResponse> {
    match MemoryService::toggle_like(app_state.db(), claims.context(), memory_id).await {
        Ok(state) => ok(
            StatusCode::OK,
            LikeResponse {
                liked: state.liked,
                likes: state.likes,
            },
            if state.liked { "Liked" } else { "Like removed" },
        ),
        Err(e) => from_service_error(e),
    }
}
