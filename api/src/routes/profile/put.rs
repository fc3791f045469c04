use super::common::UpdateProfileRequest;
use crate::auth::AuthUser;
use crate::response::{Reply, fail, from_service_error, ok};
use crate::routes::common::{UserResponse, format_validation_errors};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use services::user::{ProfileEdit, UserService};
use util::state::AppState;
use validator::Validate;

/// PUT /api/profile
///
/// ### Request Body
/// ```json
/// { "full_name": "Asha K.", "bio": "Robotics club", "profile_pic": "me.png" }
/// ```
///
/// Role, email and roll number are not editable here.
pub async fn update_profile(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Reply<UserResponse> {
    if let Err(e) = req.validate() {
        return fail(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let edit = ProfileEdit {
        full_name: req.full_name,
        phone: req.phone,
        bio: req.bio,
        department: req.department,
        year: req.year,
        profile_pic: req.profile_pic,
    };

    match UserService::update_profile(app_state.db(), claims.context(), edit, Utc::now()).await {
        Ok(user) => ok(StatusCode::OK, user.into(), "Profile updated"),
        Err(e) => from_service_error(e),
    }
}
