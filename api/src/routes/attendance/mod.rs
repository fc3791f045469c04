//! # attendance Routes Module
//!
//! QR attendance sessions, nested under `/api/attendance`.
//!
//! - `post.rs`: open, close, mark
//! - `get.rs`: list, detail, live status, roster, own history
//! - `common.rs`: request and response types

pub mod common;
pub mod get;
pub mod post;

use crate::auth::guards::{allow_authenticated, allow_staff};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use get::{get_session, list_sessions, live_status, my_attendance, roster};
use post::{close_session, create_session, mark_attendance};

/// - `GET /sessions` → `list_sessions` (teacher/admin)
/// - `POST /sessions` → `create_session` (teacher/admin)
/// - `GET /sessions/{session_id}` → `get_session` (owner/admin)
/// - `POST /sessions/{session_id}/close` → `close_session` (teacher/admin)
/// - `GET /live/{token}` → `live_status` (owner/admin)
/// - `GET /roster` → `roster` (teacher/admin)
/// - `GET|POST /mark/{token}` → `mark_attendance` (authenticated)
/// - `GET /me` → `my_attendance` (authenticated)
pub fn attendance_routes() -> Router<AppState> {
    let staff = Router::new()
        .route("/sessions", get(list_sessions).post(create_session))
        .route("/sessions/{session_id}", get(get_session))
        .route("/sessions/{session_id}/close", post(close_session))
        .route("/live/{token}", get(live_status))
        .route("/roster", get(roster))
        .route_layer(from_fn(allow_staff));

    let members = Router::new()
        .route("/mark/{token}", get(mark_attendance).post(mark_attendance))
        .route("/me", get(my_attendance))
        .route_layer(from_fn(allow_authenticated));

    staff.merge(members)
}
