#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, create_user, json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_users_admin_only() {
        let (app, state) = make_test_app().await;
        let admin = create_user(state.db(), "root", Role::Admin, None).await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;

        let response = send(&app, "GET", "/api/users", Some(&bearer(&admin)), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"].as_array().unwrap().len(), 2);

        let forbidden = send(&app, "GET", "/api/users", Some(&bearer(&teacher)), None).await;
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let anonymous = send(&app, "GET", "/api/users", None, None).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_creates_user_with_role() {
        let (app, state) = make_test_app().await;
        let admin = create_user(state.db(), "root", Role::Admin, None).await;

        let body = json!({
            "username": "org_1",
            "email": "org@campus.test",
            "password": "secret123",
            "full_name": "Event Organizer",
            "role": "organizer"
        });
        let response = send(&app, "POST", "/api/users", Some(&bearer(&admin)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["data"]["role"], "organizer");
    }

    #[tokio::test]
    async fn test_update_role_and_missing_user() {
        let (app, state) = make_test_app().await;
        let admin = create_user(state.db(), "root", Role::Admin, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let auth = bearer(&admin);

        let uri = format!("/api/users/{}/role", student.id);
        let response = send(&app, "PUT", &uri, Some(&auth), Some(json!({ "role": "teacher" }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["role"], "teacher");

        let missing = send(&app, "PUT", "/api/users/9999/role", Some(&auth), Some(json!({ "role": "teacher" }))).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_active_flips_and_rejects_self() {
        let (app, state) = make_test_app().await;
        let admin = create_user(state.db(), "root", Role::Admin, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let auth = bearer(&admin);

        let uri = format!("/api/users/{}/toggle-active", student.id);
        let response = send(&app, "PUT", &uri, Some(&auth), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["is_active"], false);
        assert_eq!(json["message"], "User deactivated");

        let own = format!("/api/users/{}/toggle-active", admin.id);
        let response = send(&app, "PUT", &own, Some(&auth), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
