use crate::auth::AuthUser;
use crate::response::{Empty, Reply, from_service_error, ok};
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use services::timetable::TimetableService;
use util::state::AppState;

/// DELETE /api/timetable/{entry_id}
///
/// - `200 OK` when removed
/// - `404 Not Found` when no such entry exists
pub async fn delete_entry(
    State(app_state): State<AppState>,
    Path(entry_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<Empty> {
    match TimetableService::delete(app_state.db(), claims.context(), entry_id).await {
        Ok(()) => ok(StatusCode::OK, Empty {}, "Entry deleted"),
        Err(e) => from_service_error(e),
    }
}
