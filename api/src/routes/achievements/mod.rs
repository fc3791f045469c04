//! Student achievements, nested under `/api/achievements`.

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::{allow_admin, allow_authenticated};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use util::state::AppState;

/// - `GET /achievements` → `list_achievements` (public)
/// - `POST /achievements` → `submit_achievement` (authenticated)
/// - `GET /achievements/pending` → `list_pending` (admin)
/// - `PUT /achievements/{achievement_id}/approve` → `approve_achievement` (admin)
pub fn achievements_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/pending", get(get::list_pending))
        .route("/{achievement_id}/approve", put(put::approve_achievement))
        .route_layer(from_fn(allow_admin));

    Router::new()
        .route(
            "/",
            get(get::list_achievements)
                .merge(post(post::submit_achievement).route_layer(from_fn(allow_authenticated))),
        )
        .merge(admin)
}
