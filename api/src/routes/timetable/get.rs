use super::common::{TimetableQuery, TimetableResponse};
use crate::auth::AuthUser;
use crate::response::{Reply, from_service_error, ok};
use axum::{
    Extension,
    extract::{Query, State},
    http::StatusCode,
};
use services::timetable::TimetableService;
use util::state::AppState;

/// GET /api/timetable?department=&year=
///
/// Weekly schedule grouped Monday..Saturday. Students get their own class and
/// teachers their own periods; the query parameters only apply to organizers
/// and admins (default `Computer Engineering` / `SE`).
pub async fn get_timetable(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(query): Query<TimetableQuery>,
) -> Reply<TimetableResponse> {
    match TimetableService::view(app_state.db(), claims.context(), query.department, query.year)
        .await
    {
        Ok(timetable) => ok(StatusCode::OK, timetable.into(), "Timetable retrieved successfully"),
        Err(e) => from_service_error(e),
    }
}
