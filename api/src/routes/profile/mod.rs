//! The caller's own profile, nested under `/api/profile`.

pub mod common;
pub mod get;
pub mod put;

use crate::auth::guards::allow_authenticated;
use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

/// - `GET /profile` → `get_profile`
/// - `PUT /profile` → `update_profile`
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::get_profile).put(put::update_profile))
        .route_layer(from_fn(allow_authenticated))
}
