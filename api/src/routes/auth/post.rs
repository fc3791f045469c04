use super::common::{AuthResponse, LoginRequest, RegisterRequest};
use crate::auth::generate_jwt;
use crate::response::{Reply, fail, from_service_error, ok};
use crate::routes::common::format_validation_errors;
use axum::{Json, extract::State, http::StatusCode};
use db::models::user::Model as UserModel;
use services::user::{Registration, UserService};
use tracing::{error, info};
use util::state::AppState;
use validator::Validate;

fn issue(user: UserModel, status: StatusCode, message: &str) -> Reply<AuthResponse> {
    match generate_jwt(user.id, user.role) {
        Ok((token, expires_at)) => ok(
            status,
            AuthResponse {
                user: user.into(),
                token,
                expires_at,
            },
            message,
        ),
        Err(e) => {
            error!(error = %e, user_id = user.id, "Token encoding failed");
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// POST /api/auth/register
///
/// Self-service sign-up. The new account is always a student.
///
/// ### Request Body
/// ```json
/// {
///   "username": "asha_k",
///   "email": "asha@campus.edu",
///   "password": "secret123",
///   "full_name": "Asha Kulkarni",
///   "department": "Computer Engineering",
///   "year": "SE",
///   "roll_number": "CE-101"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ user, token, expires_at }`
/// - `400 Bad Request` on validation failure
/// - `409 Conflict` when the email or username is taken
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Reply<AuthResponse> {
    if let Err(e) = req.validate() {
        return fail(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let registration = Registration {
        username: req.username,
        email: req.email,
        password: req.password,
        full_name: req.full_name,
        department: req.department,
        year: req.year,
        semester: req.semester,
        roll_number: req.roll_number,
        phone: req.phone,
    };

    match UserService::register(app_state.db(), registration).await {
        Ok(user) => {
            info!(user_id = user.id, "Student registered");
            issue(user, StatusCode::CREATED, "User registered successfully")
        }
        Err(e) => from_service_error(e),
    }
}

/// POST /api/auth/login
///
/// ### Request Body
/// ```json
/// { "email": "asha@campus.edu", "password": "secret123" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ user, token, expires_at }`
/// - `401 Unauthorized` for unknown email or wrong password
/// - `403 Forbidden` for a deactivated account
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Reply<AuthResponse> {
    if let Err(e) = req.validate() {
        return fail(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match UserService::authenticate(app_state.db(), &req.email, &req.password).await {
        Ok(user) => issue(user, StatusCode::OK, "Login successful"),
        Err(e) => from_service_error(e),
    }
}
