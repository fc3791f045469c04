use super::common::{CreateEventRequest, EventResponse, RegistrationResponse};
use crate::auth::AuthUser;
use crate::response::{Reply, fail, from_service_error, ok};
use crate::routes::common::{format_validation_errors, parse_date, parse_optional, parse_time};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use services::event::{CreateEvent, EventService, Registration};
use util::state::AppState;
use validator::Validate;

/// POST /api/events
///
/// ### Request Body
/// ```json
/// {
///   "title": "Code Sprint",
///   "description": "24 hour hackathon",
///   "department": "Computer Engineering",
///   "event_type": "technical",
///   "venue": "Main Auditorium",
///   "event_date": "2025-10-04",
///   "event_time": "10:00",
///   "reg_deadline": "2025-10-01",
///   "max_participants": 120,
///   "banner": "sprint.png",
///   "tags": "coding,prizes"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the event, status `upcoming`
/// - `400 Bad Request` on validation errors or malformed dates
/// - `403 Forbidden` for anyone but organizers and admins
pub async fn create_event(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateEventRequest>,
) -> Reply<EventResponse> {
    if let Err(e) = req.validate() {
        return fail(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let Some(event_date) = parse_date(req.event_date.trim()) else {
        return fail(
            StatusCode::BAD_REQUEST,
            format!("Invalid event_date '{}', expected YYYY-MM-DD", req.event_date),
        );
    };
    let event_time = match parse_optional(req.event_time.as_deref(), parse_time, "HH:MM") {
        Ok(t) => t,
        Err(msg) => return fail(StatusCode::BAD_REQUEST, msg),
    };
    let reg_deadline = match parse_optional(req.reg_deadline.as_deref(), parse_date, "YYYY-MM-DD") {
        Ok(d) => d,
        Err(msg) => return fail(StatusCode::BAD_REQUEST, msg),
    };

    let params = CreateEvent {
        title: req.title,
        description: req.description,
        department: req.department,
        event_type: req.event_type,
        venue: req.venue,
        event_date,
        event_time,
        reg_deadline,
        max_participants: req.max_participants,
        banner: req.banner,
        tags: req.tags,
    };

    match EventService::create(app_state.db(), claims.context(), params, Utc::now()).await {
        Ok(event) => ok(StatusCode::CREATED, event.into(), "Event created successfully"),
        Err(e) => from_service_error(e),
    }
}

/// POST /api/events/{event_id}/register
///
/// - `201 Created` when a place was taken
/// - `200 OK` when the caller was already registered
/// - `400 Bad Request` once the deadline passed or the event is over
/// - `404 Not Found` for an unknown event
/// - `409 Conflict` "Event is full"
pub async fn register_event(
    State(app_state): State<AppState>,
    Path(event_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<RegistrationResponse> {
    let registered = RegistrationResponse {
        event_id,
        registered: true,
    };
    match EventService::register(app_state.db(), claims.context(), event_id, Utc::now()).await {
        Ok(Registration::Registered) => ok(StatusCode::CREATED, registered, "Registered successfully"),
        Ok(Registration::AlreadyRegistered) => ok(StatusCode::OK, registered, "Already registered"),
        Err(e) => from_service_error(e),
    }
}

/// POST /api/events/{event_id}/unregister
///
/// `200 OK` whether or not the caller held a place.
pub async fn unregister_event(
    State(app_state): State<AppState>,
    Path(event_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<RegistrationResponse> {
    let response = RegistrationResponse {
        event_id,
        registered: false,
    };
    match EventService::unregister(app_state.db(), claims.context(), event_id).await {
        Ok(true) => ok(StatusCode::OK, response, "Unregistered"),
        Ok(false) => ok(StatusCode::OK, response, "You were not registered for this event"),
        Err(e) => from_service_error(e),
    }
}
