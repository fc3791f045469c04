use api::auth::generate_jwt;
use api::routes::routes;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use db::models::user::{Model as UserModel, NewUser, Role};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use util::state::AppState;

/// Router mounted under `/api` over a fresh in-memory database.
pub async fn make_test_app() -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db);
    let router = Router::new().nest("/api", routes(app_state.clone()));
    (router, app_state)
}

/// Inserts an active user in `Computer Engineering`; `year` applies to students.
pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    role: Role,
    year: Option<&str>,
) -> UserModel {
    UserModel::create(
        db,
        NewUser {
            username: username.into(),
            email: format!("{username}@campus.test"),
            password: "secret123".into(),
            full_name: format!("{username} full"),
            role,
            department: Some("Computer Engineering".into()),
            year: year.map(String::from),
            semester: None,
            roll_number: Some(format!("R-{username}")),
            phone: None,
        },
    )
    .await
    .expect("Failed to create user")
}

pub fn bearer(user: &UserModel) -> String {
    let (token, _) = generate_jwt(user.id, user.role).expect("Failed to sign token");
    format!("Bearer {token}")
}

/// Sends one request; `body` is serialized as JSON when present.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    let req = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(req).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
