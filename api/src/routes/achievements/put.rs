use super::common::AchievementResponse;
use crate::auth::AuthUser;
use crate::response::{Reply, from_service_error, ok};
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use services::achievement::AchievementService;
use util::state::AppState;

/// PUT /api/achievements/{achievement_id}/approve
///
/// Admin only. Approving twice is harmless.
pub async fn approve_achievement(
    State(app_state): State<AppState>,
    Path(achievement_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<AchievementResponse> {
    match AchievementService::approve(app_state.db(), claims.context(), achievement_id).await {
        Ok(a) => ok(StatusCode::OK, a.into(), "Achievement approved"),
        Err(e) => from_service_error(e),
    }
}
