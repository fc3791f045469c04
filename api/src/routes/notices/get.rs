use super::common::{NoticeQuery, NoticeResponse};
use crate::auth::AuthUser;
use crate::response::{Reply, from_service_error, ok};
use axum::{
    Extension,
    extract::{Query, State},
    http::StatusCode,
};
use services::notice::NoticeService;
use util::state::AppState;

/// GET /api/notices?category=
///
/// Important notices first, then newest. Students only receive notices whose
/// department and year are `All` or match their own.
pub async fn list_notices(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(query): Query<NoticeQuery>,
) -> Reply<Vec<NoticeResponse>> {
    match NoticeService::list(app_state.db(), claims.context(), query.category).await {
        Ok(notices) => ok(
            StatusCode::OK,
            notices.into_iter().map(NoticeResponse::from).collect(),
            "Notices retrieved successfully",
        ),
        Err(e) => from_service_error(e),
    }
}
