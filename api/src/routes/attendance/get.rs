use super::common::{
    LiveStatusResponse, MyAttendanceResponse, RosterResponse, SessionDetailResponse,
    SessionSummaryResponse,
};
use crate::auth::AuthUser;
use crate::response::{Reply, from_attendance_error, ok};
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use services::attendance::AttendanceService;
use util::state::AppState;

/// GET /api/attendance/sessions
///
/// The caller's 20 most recent sessions, newest first, each with
/// `present_count`.
pub async fn list_sessions(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<Vec<SessionSummaryResponse>> {
    match AttendanceService::list_for_teacher(app_state.db(), claims.context(), Utc::now()).await {
        Ok(sessions) => ok(
            StatusCode::OK,
            sessions.into_iter().map(SessionSummaryResponse::from).collect(),
            "Sessions retrieved successfully",
        ),
        Err(e) => from_attendance_error(e),
    }
}

/// GET /api/attendance/sessions/{session_id}
///
/// Roll call of one session. Owner or admin only.
pub async fn get_session(
    State(app_state): State<AppState>,
    Path(session_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<SessionDetailResponse> {
    match AttendanceService::session_detail(app_state.db(), claims.context(), session_id, Utc::now())
        .await
    {
        Ok(detail) => ok(StatusCode::OK, detail.into(), "Session retrieved successfully"),
        Err(e) => from_attendance_error(e),
    }
}

/// GET /api/attendance/live/{token}
///
/// Polled by the session owner while the QR code is on screen.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "data": {
///     "session_id": 7,
///     "subject": "Data Structures",
///     "count": 2,
///     "is_active": true,
///     "expires_at": "2025-09-08T10:15:00+00:00",
///     "recent": [
///       { "student_name": "Asha Kulkarni", "marked_at": "2025-09-08T10:03:12+00:00" }
///     ]
///   },
///   "message": "Live status"
/// }
/// ```
pub async fn live_status(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<LiveStatusResponse> {
    match AttendanceService::live_status(app_state.db(), claims.context(), &token, Utc::now()).await
    {
        Ok(status) => ok(StatusCode::OK, status.into(), "Live status"),
        Err(e) => from_attendance_error(e),
    }
}

/// GET /api/attendance/me
///
/// The caller's attendance records and the number of finished sessions for
/// their class.
pub async fn my_attendance(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<MyAttendanceResponse> {
    match AttendanceService::student_history(app_state.db(), claims.context(), Utc::now()).await {
        Ok(history) => ok(StatusCode::OK, history.into(), "Attendance retrieved successfully"),
        Err(e) => from_attendance_error(e),
    }
}

/// GET /api/attendance/roster
///
/// Students of the caller's department, each with the number of the caller's
/// sessions they attended. Empty when the caller has no department.
pub async fn roster(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Reply<RosterResponse> {
    match AttendanceService::roster(app_state.db(), claims.context()).await {
        Ok(roster) => ok(StatusCode::OK, roster.into(), "Roster retrieved successfully"),
        Err(e) => from_attendance_error(e),
    }
}
