//! Noticeboard routes, nested under `/api/notices`.

pub mod common;
pub mod get;
pub mod post;

use crate::auth::guards::{allow_authenticated, allow_publisher};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

pub fn notices_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get::list_notices)
            .route_layer(from_fn(allow_authenticated))
            .merge(post(post::create_notice).route_layer(from_fn(allow_publisher))),
    )
}
