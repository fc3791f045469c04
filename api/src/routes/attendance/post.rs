use super::common::{CloseResponse, CreateSessionRequest, CreatedSessionResponse, MarkResponse};
use crate::auth::AuthUser;
use crate::response::{Reply, fail, from_attendance_error, ok};
use crate::routes::common::format_validation_errors;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use services::attendance::{AttendanceService, CreateSession, MarkOutcome};
use util::state::AppState;
use validator::Validate;

/// POST /api/attendance/sessions
///
/// Opens an attendance session owned by the caller.
///
/// ### Request Body
/// ```json
/// {
///   "subject": "Data Structures",
///   "department": "Computer Engineering",
///   "year": "SE",
///   "room": "301",
///   "duration_minutes": 15
/// }
/// ```
/// `department` defaults to the caller's, `duration_minutes` to the
/// configured default.
///
/// ### Response: 201 Created
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 7,
///     "token": "K3J9QX0LM2PA",
///     "qr_data": "CAMPUS-ATTENDANCE:K3J9QX0LM2PA",
///     "mark_path": "/api/attendance/mark/K3J9QX0LM2PA",
///     "expires_at": "2025-09-08T10:15:00+00:00",
///     ...
///   },
///   "message": "Attendance session created"
/// }
/// ```
pub async fn create_session(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CreateSessionRequest>,
) -> Reply<CreatedSessionResponse> {
    if let Err(e) = req.validate() {
        return fail(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let params = CreateSession {
        subject: req.subject,
        department: req.department,
        year: req.year,
        room: req.room,
        duration_minutes: req.duration_minutes,
    };

    match AttendanceService::create_session(app_state.db(), claims.context(), params, Utc::now())
        .await
    {
        Ok(created) => ok(
            StatusCode::CREATED,
            created.into(),
            "Attendance session created",
        ),
        Err(e) => from_attendance_error(e),
    }
}

/// GET|POST /api/attendance/mark/{token}
///
/// Marks the caller present. Repeating the call is harmless.
///
/// ### Responses
/// - `200 OK` "Attendance marked for <subject>"
/// - `200 OK` "Attendance already marked for this session" (`already_marked: true`)
/// - `403 Forbidden` when the caller is not a student
/// - `404 Not Found` for an unknown token
/// - `410 Gone` once the session has expired or been closed
pub async fn mark_attendance(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<MarkResponse> {
    match AttendanceService::mark(app_state.db(), claims.context(), &token, Utc::now()).await {
        Ok(MarkOutcome::Marked { subject }) => {
            let message = format!("Attendance marked for {subject}");
            ok(
                StatusCode::OK,
                MarkResponse {
                    already_marked: false,
                    subject: Some(subject),
                },
                message,
            )
        }
        Ok(MarkOutcome::AlreadyMarked) => ok(
            StatusCode::OK,
            MarkResponse {
                already_marked: true,
                subject: None,
            },
            "Attendance already marked for this session",
        ),
        Err(e) => from_attendance_error(e),
    }
}

/// POST /api/attendance/sessions/{session_id}/close
///
/// Always `200 OK`; `closed` is false when nothing changed (already inactive
/// or owned by another teacher).
pub async fn close_session(
    State(app_state): State<AppState>,
    Path(session_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<CloseResponse> {
    match AttendanceService::close(app_state.db(), claims.context(), session_id).await {
        Ok(outcome) => {
            let message = if outcome.closed {
                "Session closed"
            } else {
                "Session was not active or not yours"
            };
            ok(
                StatusCode::OK,
                CloseResponse {
                    session_id: outcome.session_id,
                    closed: outcome.closed,
                },
                message,
            )
        }
        Err(e) => from_attendance_error(e),
    }
}
