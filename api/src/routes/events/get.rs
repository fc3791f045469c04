use super::common::{EventDetailResponse, EventQuery, EventSummaryResponse};
use crate::auth::AuthUser;
use crate::response::{Reply, fail, from_service_error, ok};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use db::models::event::{EventFilter, EventStatus};
use services::event::EventService;
use util::state::AppState;

/// GET /api/events?dept=&type=&status=&q=
///
/// Public. Latest event date first, each with its registration count.
/// `dept` also matches events open to `All`; `q` searches title and
/// description.
pub async fn list_events(
    State(app_state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Reply<Vec<EventSummaryResponse>> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    let status = match non_empty(query.status) {
        Some(raw) => match raw.parse::<EventStatus>() {
            Ok(status) => Some(status),
            Err(_) => return fail(StatusCode::BAD_REQUEST, format!("Unknown event status '{raw}'")),
        },
        None => None,
    };
    let filter = EventFilter {
        department: non_empty(query.dept),
        event_type: non_empty(query.event_type),
        status,
        search: non_empty(query.q),
    };

    match EventService::list(app_state.db(), filter).await {
        Ok(events) => ok(
            StatusCode::OK,
            events.into_iter().map(EventSummaryResponse::from).collect(),
            "Events retrieved successfully",
        ),
        Err(e) => from_service_error(e),
    }
}

/// GET /api/events/{event_id}
///
/// Public. With a bearer token `is_registered` reflects the caller.
///
/// - `200 OK` with up to 30 attendees and the event's memories
/// - `404 Not Found` when the event does not exist
pub async fn get_event(
    State(app_state): State<AppState>,
    Path(event_id): Path<i64>,
    auth: Option<AuthUser>,
) -> Reply<EventDetailResponse> {
    let viewer = auth.map(|AuthUser(claims)| claims.context());
    match EventService::detail(app_state.db(), viewer, event_id).await {
        Ok(detail) => ok(StatusCode::OK, detail.into(), "Event retrieved successfully"),
        Err(e) => from_service_error(e),
    }
}
