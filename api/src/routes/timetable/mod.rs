//! # timetable Routes Module
//!
//! Weekly class schedule, nested under `/api/timetable`.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use crate::auth::guards::{allow_authenticated, allow_staff};
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};
use util::state::AppState;

/// - `GET /timetable` → `get_timetable` (authenticated)
/// - `POST /timetable` → `add_entry` (teacher/admin)
/// - `DELETE /timetable/{entry_id}` → `delete_entry` (teacher/admin)
pub fn timetable_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get::get_timetable)
                .route_layer(from_fn(allow_authenticated))
                .merge(post(post::add_entry).route_layer(from_fn(allow_staff))),
        )
        .route(
            "/{entry_id}",
            delete(delete::delete_entry).route_layer(from_fn(allow_staff)),
        )
}
