use super::common::UpdateRoleRequest;
use crate::auth::AuthUser;
use crate::response::{Reply, from_service_error, ok};
use crate::routes::common::UserResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use services::user::UserService;
use util::state::AppState;

/// PUT /api/users/{user_id}/role
///
/// ### Request Body
/// ```json
/// { "role": "organizer" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated user
/// - `404 Not Found`
pub async fn update_role(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<UpdateRoleRequest>,
) -> Reply<UserResponse> {
    match UserService::change_role(app_state.db(), claims.context(), user_id, req.role).await {
        Ok(user) => ok(StatusCode::OK, user.into(), "Role updated"),
        Err(e) => from_service_error(e),
    }
}

/// PUT /api/users/{user_id}/toggle-active
///
/// Flips the active flag. Deactivated users cannot log in. Admins cannot
/// deactivate themselves.
pub async fn toggle_active(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<UserResponse> {
    match UserService::toggle_active(app_state.db(), claims.context(), user_id).await {
        Ok(user) => {
            let message = if user.is_active {
                "User activated"
            } else {
                "User deactivated"
            };
            ok(StatusCode::OK, user.into(), message)
        }
        Err(e) => from_service_error(e),
    }
}
