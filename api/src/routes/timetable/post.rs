use super::common::{AddEntryRequest, EntryResponse};
use crate::auth::AuthUser;
use crate::response::{Reply, fail, from_service_error, ok};
use crate::routes::common::{format_validation_errors, parse_time};
use axum::{Extension, Json, extract::State, http::StatusCode};
use services::timetable::{AddEntry, TimetableService};
use util::state::AppState;
use validator::Validate;

/// POST /api/timetable
///
/// ### Request Body
/// ```json
/// {
///   "department": "Computer Engineering",
///   "year": "SE",
///   "semester": "3",
///   "day": "Monday",
///   "period": 1,
///   "subject": "Data Structures",
///   "teacher_id": 2,
///   "room": "301",
///   "time_from": "09:00",
///   "time_to": "10:00"
/// }
/// ```
/// `teacher_name` is looked up from `teacher_id` when omitted.
pub async fn add_entry(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<AddEntryRequest>,
) -> Reply<EntryResponse> {
    if let Err(e) = req.validate() {
        return fail(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let mut times = [None, None];
    for (slot, raw) in times.iter_mut().zip([&req.time_from, &req.time_to]) {
        if let Some(raw) = raw.as_deref().filter(|s| !s.is_empty()) {
            match parse_time(raw) {
                Some(t) => *slot = Some(t),
                None => {
                    return fail(
                        StatusCode::BAD_REQUEST,
                        format!("Invalid time '{raw}', expected HH:MM"),
                    );
                }
            }
        }
    }
    let [time_from, time_to] = times;

    let params = AddEntry {
        department: req.department,
        year: req.year,
        semester: req.semester,
        day: req.day,
        period: req.period,
        subject: req.subject,
        teacher_id: req.teacher_id,
        teacher_name: req.teacher_name,
        room: req.room,
        time_from,
        time_to,
    };

    match TimetableService::add(app_state.db(), claims.context(), params).await {
        Ok(entry) => ok(StatusCode::CREATED, entry.into(), "Timetable entry added"),
        Err(e) => from_service_error(e),
    }
}
