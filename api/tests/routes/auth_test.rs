#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, create_user, json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::{Model as UserModel, Role};
    use serde_json::json;

    fn registration(username: &str) -> serde_json::Value {
        json!({
            "username": username,
            "email": format!("{username}@campus.test"),
            "password": "secret123",
            "full_name": "Asha Kulkarni",
            "department": "Computer Engineering",
            "year": "SE",
            "roll_number": "CE-101"
        })
    }

    // --- POST /api/auth/register ---

    #[tokio::test]
    async fn test_register_creates_student_and_returns_token() {
        let (app, _) = make_test_app().await;

        let response = send(&app, "POST", "/api/auth/register", None, Some(registration("asha"))).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["user"]["role"], "student");
        assert_eq!(json["data"]["user"]["year"], "SE");
        assert!(json["data"]["user"].get("password_hash").is_none());
        assert!(!json["data"]["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let (app, _) = make_test_app().await;

        send(&app, "POST", "/api/auth/register", None, Some(registration("asha"))).await;
        let response = send(&app, "POST", "/api/auth/register", None, Some(registration("asha"))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["success"], false);
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let (app, _) = make_test_app().await;

        let body = json!({
            "username": "a",
            "email": "not-an-email",
            "password": "123",
            "full_name": "X"
        });
        let response = send(&app, "POST", "/api/auth/register", None, Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let message = json_body(response).await["message"].as_str().unwrap().to_string();
        assert!(message.contains("Invalid email format"));
        assert!(message.contains("Password must be at least 6 characters"));
    }

    // --- POST /api/auth/login ---

    #[tokio::test]
    async fn test_login_success_and_bad_password() {
        let (app, state) = make_test_app().await;
        create_user(state.db(), "prof", Role::Teacher, None).await;

        let ok = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "prof@campus.test", "password": "secret123" })),
        )
        .await;
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(json_body(ok).await["data"]["user"]["role"], "teacher");

        let bad = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "prof@campus.test", "password": "wrong-pass" })),
        )
        .await;
        assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(bad).await["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_deactivated_account_forbidden() {
        let (app, state) = make_test_app().await;
        let user = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        UserModel::toggle_active(state.db(), user.id).await.unwrap();

        let response = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "stud@campus.test", "password": "secret123" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    // --- GET /api/auth/me ---

    #[tokio::test]
    async fn test_me_requires_token() {
        let (app, state) = make_test_app().await;
        let user = create_user(state.db(), "stud", Role::Student, Some("SE")).await;

        let anonymous = send(&app, "GET", "/api/auth/me", None, None).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let response = send(&app, "GET", "/api/auth/me", Some(&bearer(&user)), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["username"], "stud");
    }
}
