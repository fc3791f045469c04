//! Photo memories gallery, nested under `/api/memories`.

pub mod common;
pub mod get;
pub mod post;

use crate::auth::guards::{allow_authenticated, allow_organizer};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

/// - `GET /memories` → `gallery` (public)
/// - `POST /memories` → `upload_memories` (organizer/admin)
/// - `POST /memories/{memory_id}/like` → `toggle_like` (authenticated)
pub fn memories_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get::gallery).merge(post(post::upload_memories).route_layer(from_fn(allow_organizer))),
        )
        .route(
            "/{memory_id}/like",
            post(post::toggle_like).route_layer(from_fn(allow_authenticated)),
        )
}
