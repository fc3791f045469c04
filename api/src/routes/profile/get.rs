use super::common::ProfileResponse;
use crate::auth::AuthUser;
use crate::response::{Reply, from_service_error, ok};
use axum::{Extension, extract::State, http::StatusCode};
use services::user::UserService;
use util::state::AppState;

/// GET /api/profile
///
/// The caller with the events they registered for and every achievement
/// they submitted, approved or not.
pub async fn get_profile(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<ProfileResponse> {
    match UserService::overview(app_state.db(), claims.context()).await {
        Ok(profile) => ok(StatusCode::OK, profile.into(), "Profile retrieved successfully"),
        Err(e) => from_service_error(e),
    }
}
