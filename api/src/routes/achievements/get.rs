use super::common::{AchievementQuery, AchievementResponse};
use crate::auth::AuthUser;
use crate::response::{Reply, from_service_error, ok};
use axum::{
    Extension,
    extract::{Query, State},
    http::StatusCode,
};
use services::achievement::AchievementService;
use util::state::AppState;

/// GET /api/achievements?dept=
///
/// Public. Approved achievements only, latest date first.
pub async fn list_achievements(
    State(app_state): State<AppState>,
    Query(query): Query<AchievementQuery>,
) -> Reply<Vec<AchievementResponse>> {
    match AchievementService::list(app_state.db(), query.dept).await {
        Ok(list) => ok(
            StatusCode::OK,
            list.into_iter().map(AchievementResponse::from).collect(),
            "Achievements retrieved successfully",
        ),
        Err(e) => from_service_error(e),
    }
}

/// GET /api/achievements/pending
///
/// Submissions awaiting approval, oldest first. Admin only.
pub async fn list_pending(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<Vec<AchievementResponse>> {
    match AchievementService::pending(app_state.db(), claims.context()).await {
        Ok(list) => ok(
            StatusCode::OK,
            list.into_iter().map(AchievementResponse::from).collect(),
            "Pending achievements retrieved successfully",
        ),
        Err(e) => from_service_error(e),
    }
}
