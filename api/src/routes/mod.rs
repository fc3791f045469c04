//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/auth` → register, login, current user
//! - `/users` → user management (admin only)
//! - `/attendance` → QR attendance sessions
//! - `/timetable` → weekly class schedule
//! - `/notices` → noticeboard
//! - `/events` → campus events and registration
//! - `/memories` → photo gallery and likes
//! - `/achievements` → student achievements
//! - `/profile` → the caller's own profile
//! - `/departments`, `/stats` → public campus directory

use crate::auth::guards::allow_admin;
use crate::routes::{
    achievements::achievements_routes, attendance::attendance_routes, auth::auth_routes,
    campus::campus_routes, events::events_routes, health::health_routes,
    memories::memories_routes, notices::notices_routes, profile::profile_routes,
    timetable::timetable_routes, users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod achievements;
pub mod attendance;
pub mod auth;
pub mod campus;
pub mod common;
pub mod events;
pub mod health;
pub mod memories;
pub mod notices;
pub mod profile;
pub mod timetable;
pub mod users;

/// Builds the application router for every HTTP endpoint.
///
/// Each group carries its own role guards except `/users`, which is wrapped in
/// `allow_admin` here.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .nest("/attendance", attendance_routes())
        .nest("/timetable", timetable_routes())
        .nest("/notices", notices_routes())
        .nest("/events", events_routes())
        .nest("/memories", memories_routes())
        .nest("/achievements", achievements_routes())
        .nest("/profile", profile_routes())
        .merge(campus_routes())
        .with_state(app_state)
}
