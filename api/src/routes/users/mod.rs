//! # Users Routes Module
//!
//! Admin-only user management, nested under `/api/users`. The admin guard is
//! applied where the group is mounted.

use axum::{
    Router,
    routing::{get, put},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use get::list_users;
use post::create_user;
use put::{toggle_active, update_role};

/// - `GET /users` → `list_users`
/// - `POST /users` → `create_user`
/// - `PUT /users/{user_id}/role` → `update_role`
/// - `PUT /users/{user_id}/toggle-active` → `toggle_active`
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{user_id}/role", put(update_role))
        .route("/{user_id}/toggle-active", put(toggle_active))
}
