//! # auth Routes Module
//!
//! - `post.rs`: register, login
//! - `get.rs`: current user
//!
//! `auth_routes()` is nested under `/api/auth`. Only `/me` needs a token; it
//! carries its own guard so the rest of the group stays public.

pub mod common;
pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use get::get_me;
use post::{login, register};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_me).route_layer(from_fn(allow_authenticated)))
}
