use super::common::CreateUserRequest;
use crate::auth::AuthUser;
use crate::response::{Reply, fail, from_service_error, ok};
use crate::routes::common::{UserResponse, format_validation_errors};
use axum::{Extension, Json, extract::State, http::StatusCode};
use db::models::user::NewUser;
use services::user::UserService;
use util::state::AppState;
use validator::Validate;

/// POST /api/users
///
/// Creates a user with any role.
///
/// ### Request Body
/// ```json
/// {
///   "username": "prof_rao",
///   "email": "rao@campus.edu",
///   "password": "secret123",
///   "full_name": "Prof. Rao",
///   "role": "teacher",
///   "department": "Computer Engineering"
/// }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` on validation failure
/// - `409 Conflict` when the email or username is taken
pub async fn create_user(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateUserRequest>,
) -> Reply<UserResponse> {
    if let Err(e) = req.validate() {
        return fail(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let new = NewUser {
        username: req.username,
        email: req.email,
        password: req.password,
        full_name: req.full_name,
        role: req.role,
        department: req.department,
        year: req.year,
        semester: req.semester,
        roll_number: req.roll_number,
        phone: req.phone,
    };

    match UserService::create(app_state.db(), claims.context(), new).await {
        Ok(user) => {
            let message = format!("{} account created", user.role.title());
            ok(StatusCode::CREATED, user.into(), message)
        }
        Err(e) => from_service_error(e),
    }
}
