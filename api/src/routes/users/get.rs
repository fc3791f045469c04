use crate::auth::AuthUser;
use crate::response::{Reply, from_service_error, ok};
use crate::routes::common::UserResponse;
use axum::{Extension, extract::State, http::StatusCode};
use services::user::UserService;
use util::state::AppState;

/// GET /api/users
///
/// Every user, ordered by role then full name.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "id": 1, "username": "admin", "role": "admin", "is_active": true, ... }
///   ],
///   "message": "Users retrieved successfully"
/// }
/// ```
pub async fn list_users(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<Vec<UserResponse>> {
    match UserService::list(app_state.db(), claims.context()).await {
        Ok(users) => ok(
            StatusCode::OK,
            users.into_iter().map(UserResponse::from).collect(),
            "Users retrieved successfully",
        ),
        Err(e) => from_service_error(e),
    }
}
