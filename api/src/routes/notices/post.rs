use super::common::{CreateNoticeRequest, NoticeResponse};
use crate::auth::AuthUser;
use crate::response::{Reply, fail, from_service_error, ok};
use crate::routes::common::format_validation_errors;
use axum::{Extension, Json, extract::State, http::StatusCode};
use services::notice::{NoticeService, PostNotice};
use util::state::AppState;
use validator::Validate;

/// POST /api/notices
///
/// ### Request Body
/// ```json
/// {
///   "title": "Mid-semester exams",
///   "content": "Exams start on Monday.",
///   "category": "exam",
///   "department": "Computer Engineering",
///   "year": "SE",
///   "is_important": true
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the stored notice, including `whatsapp_message`
/// - `400 Bad Request` on validation errors
/// - `403 Forbidden` for students
pub async fn create_notice(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateNoticeRequest>,
) -> Reply<NoticeResponse> {
    if let Err(e) = req.validate() {
        return fail(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let params = PostNotice {
        title: req.title.trim().to_string(),
        content: req.content,
        category: req.category,
        department: req.department,
        year: req.year,
        is_important: req.is_important,
    };

    match NoticeService::post(app_state.db(), claims.context(), params).await {
        Ok(notice) => ok(StatusCode::CREATED, notice.into(), "Notice posted successfully"),
        Err(e) => from_service_error(e),
    }
}
