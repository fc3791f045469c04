use crate::auth::AuthUser;
use crate::response::{Reply, from_service_error, ok};
use crate::routes::common::UserResponse;
use axum::{Extension, extract::State, http::StatusCode};
use services::user::UserService;
use util::state::AppState;

/// GET /api/auth/me
///
/// Profile of the authenticated caller.
pub async fn get_me(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<UserResponse> {
    match UserService::profile(app_state.db(), claims.context()).await {
        Ok(user) => ok(StatusCode::OK, user.into(), "User data retrieved successfully"),
        Err(e) => from_service_error(e),
    }
}
