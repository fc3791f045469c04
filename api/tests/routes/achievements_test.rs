#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, create_user, json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    #[tokio::test]
    async fn test_submission_waits_for_admin_approval() {
        let (app, state) = make_test_app().await;
        let student = create_user(state.db(), "stud", Role::Student, Some("TE")).await;
        let admin = create_user(state.db(), "root", Role::Admin, None).await;

        let body = json!({
            "title": "Hackathon winner",
            "achievement_type": "competition",
            "date": "2025-08-30",
            "certificate": "sih.jpg"
        });
        let response = send(&app, "POST", "/api/achievements", Some(&bearer(&student)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        let id = json["data"]["id"].as_i64().unwrap();
        assert_eq!(json["data"]["approved"], false);
        assert_eq!(json["data"]["department"], "Computer Engineering");
        assert_eq!(json["data"]["date"], "2025-08-30");
        assert!(json["data"]["certificate_image"].as_str().unwrap().starts_with("cert_"));

        let public = json_body(send(&app, "GET", "/api/achievements", None, None).await).await;
        assert!(public["data"].as_array().unwrap().is_empty());

        let response = send(&app, "GET", "/api/achievements/pending", Some(&bearer(&student)), None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let pending = json_body(send(&app, "GET", "/api/achievements/pending", Some(&bearer(&admin)), None).await).await;
        assert_eq!(pending["data"][0]["student_name"], "stud full");

        let uri = format!("/api/achievements/{id}/approve");
        let response = send(&app, "PUT", &uri, Some(&bearer(&admin)), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["approved"], true);

        let json = json_body(send(&app, "GET", "/api/achievements?dept=Computer%20Engineering", None, None).await).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        let json = json_body(send(&app, "GET", "/api/achievements?dept=Civil%20Engineering", None, None).await).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        let response = send(&app, "PUT", "/api/achievements/9999/approve", Some(&bearer(&admin)), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_input() {
        let (app, state) = make_test_app().await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let auth = bearer(&student);

        let body = json!({ "title": "Paper", "achievement_type": "research", "date": "30-08-2025" });
        let response = send(&app, "POST", "/api/achievements", Some(&auth), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json!({ "title": "Paper", "achievement_type": "research", "certificate": "paper.pdf" });
        let response = send(&app, "POST", "/api/achievements", Some(&auth), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json!({ "title": "Paper", "achievement_type": "research" });
        let response = send(&app, "POST", "/api/achievements", None, Some(body)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
