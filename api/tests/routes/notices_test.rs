#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, create_user, json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    #[tokio::test]
    async fn test_post_notice_builds_whatsapp_text() {
        let (app, state) = make_test_app().await;
        let organizer = create_user(state.db(), "org", Role::Organizer, None).await;

        let body = json!({ "title": "Tech Fest", "content": "Friday in the main hall.", "category": "event" });
        let response = send(&app, "POST", "/api/notices", Some(&bearer(&organizer)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        assert_eq!(json["data"]["department"], "All");
        assert_eq!(json["data"]["author_role"], "organizer");
        let whatsapp = json["data"]["whatsapp_message"].as_str().unwrap();
        assert!(whatsapp.starts_with("📢 *CampusConnect*\n*Tech Fest*"));
        assert!(whatsapp.contains("_From: org full | Organizer_"));
    }

    #[tokio::test]
    async fn test_students_cannot_post() {
        let (app, state) = make_test_app().await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;

        let body = json!({ "title": "Hi", "content": "Hello" });
        let response = send(&app, "POST", "/api/notices", Some(&bearer(&student)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_list_filters_audience_and_category() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let auth = bearer(&teacher);

        for body in [
            json!({ "title": "For all", "content": "x", "category": "general" }),
            json!({ "title": "For SE", "content": "x", "year": "SE", "category": "exam", "is_important": true }),
            json!({ "title": "For BE", "content": "x", "year": "BE", "category": "exam" }),
        ] {
            send(&app, "POST", "/api/notices", Some(&auth), Some(body)).await;
        }

        let seen = json_body(send(&app, "GET", "/api/notices", Some(&bearer(&student)), None).await).await;
        let titles: Vec<&str> = seen["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["For SE", "For all"]);

        let exams = json_body(send(&app, "GET", "/api/notices?category=exam", Some(&auth), None).await).await;
        assert_eq!(exams["data"].as_array().unwrap().len(), 2);
    }
}
