//! Role guards applied with `axum::middleware::from_fn`.
//!
//! Each guard authenticates the request, stores the `AuthUser` in the request
//! extensions for handlers to pick up, and rejects callers whose role is not
//! allowed. Roles come from the token, so a role change applies at the next
//! login.

use crate::auth::claims::AuthUser;
use crate::response::{ApiResponse, Empty};
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::Role;

type GuardRejection = (StatusCode, Json<ApiResponse<Empty>>);

async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), GuardRejection> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

async fn allow_roles(
    req: Request<Body>,
    next: Next,
    roles: &[Role],
    failure_msg: &str,
) -> Result<Response, GuardRejection> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !roles.contains(&user.0.role) {
        tracing::warn!(user_id = user.0.sub, role = %user.0.role, "Role guard rejected request");
        return Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(failure_msg))));
    }

    Ok(next.run(req).await)
}

/// Any valid token.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    let (req, _user) = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}

pub async fn allow_admin(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_roles(req, next, &[Role::Admin], "Admin access required").await
}

/// Teachers and admins.
pub async fn allow_staff(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_roles(
        req,
        next,
        &[Role::Teacher, Role::Admin],
        "Teacher or admin access required",
    )
    .await
}

/// Roles allowed to post notices.
pub async fn allow_publisher(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_roles(
        req,
        next,
        &[Role::Teacher, Role::Organizer, Role::Admin],
        "Only teachers, organizers and admins can post notices",
    )
    .await
}

/// Organizers and admins run events and the memories gallery.
pub async fn allow_organizer(req: Request<Body>, next: Next) -> Result<Response, GuardRejection> {
    allow_roles(
        req,
        next,
        &[Role::Organizer, Role::Admin],
        "Organizer or admin access required",
    )
    .await
}
