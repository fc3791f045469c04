//! Campus events, nested under `/api/events`.

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

use get::{get_event, list_events};
use post::{create_event, register_event, unregister_event};

/// - `GET /events` → `list_events` (public)
/// - `POST /events` → `create_event` (organizer/admin)
/// - `GET /events/{event_id}` → `get_event` (public, personalised with a token)
/// - `POST /events/{event_id}/register` → `register_event` (authenticated)
/// - `POST /events/{event_id}/unregister` → `unregister_event` (authenticated)
pub fn events_routes() -> Router<AppState> {
    let members = Router::new()
        .route("/{event_id}/register", post(register_event))
        .route("/{event_id}/unregister", post(unregister_event))
        .route_layer(from_fn(allow_authenticated));

    Router::new()
        .route(
            "/",
            get(list_events).merge(post(create_event).route_layer(from_fn(allow_organizer))),
        )
        .route("/{event_id}", get(get_event))
        .merge(members)
}
