use super::common::{AchievementResponse, SubmitAchievementRequest};
use crate::auth::AuthUser;
use crate::response::{Reply, fail, from_service_error, ok};
use crate::routes::common::{format_validation_errors, parse_date, parse_optional};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use services::achievement::{AchievementService, SubmitAchievement};
use util::state::AppState;
use validator::Validate;

/// POST /api/achievements
///
/// ### Request Body
/// ```json
/// {
///   "title": "Smart India Hackathon winner",
///   "achievement_type": "competition",
///   "date": "2025-08-30",
///   "certificate": "sih.jpg"
/// }
/// ```
///
/// - `201 Created` with `approved: false`
/// - `400 Bad Request` on validation errors or a non-image certificate
pub async fn submit_achievement(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<SubmitAchievementRequest>,
) -> Reply<AchievementResponse> {
    if let Err(e) = req.validate() {
        return fail(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }
    let date = match parse_optional(req.date.as_deref(), parse_date, "YYYY-MM-DD") {
        Ok(d) => d,
        Err(msg) => return fail(StatusCode::BAD_REQUEST, msg),
    };

    let params = SubmitAchievement {
        title: req.title,
        description: req.description,
        achievement_type: req.achievement_type,
        date,
        certificate: req.certificate,
        department: req.department,
    };

    match AchievementService::submit(app_state.db(), claims.context(), params, Utc::now()).await {
        Ok(a) => ok(StatusCode::CREATED, a.into(), "Achievement submitted for approval"),
        Err(e) => from_service_error(e),
    }
}
