#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, create_user, json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    #[tokio::test]
    async fn test_departments_carry_counts() {
        let (app, state) = make_test_app().await;
        let organizer = create_user(state.db(), "org", Role::Organizer, None).await;
        create_user(state.db(), "s1", Role::Student, Some("SE")).await;
        create_user(state.db(), "s2", Role::Student, Some("TE")).await;
        let body = json!({ "title": "Open day", "event_type": "general", "event_date": "2099-01-15" });
        send(&app, "POST", "/api/events", Some(&bearer(&organizer)), Some(body)).await;

        let response = send(&app, "GET", "/api/departments", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let departments = json["data"].as_array().unwrap();
        assert_eq!(departments.len(), 6);

        let ce = departments.iter().find(|d| d["code"] == "CE").unwrap();
        assert_eq!(ce["name"], "Computer Engineering");
        assert_eq!(ce["student_count"], 2);
        assert_eq!(ce["event_count"], 1);

        let civil = departments.iter().find(|d| d["code"] == "Civil").unwrap();
        assert_eq!(civil["student_count"], 0);
        assert_eq!(civil["event_count"], 1);
    }

    #[tokio::test]
    async fn test_stats_count_students_only() {
        let (app, state) = make_test_app().await;
        create_user(state.db(), "s1", Role::Student, Some("SE")).await;
        create_user(state.db(), "prof", Role::Teacher, None).await;

        let json = json_body(send(&app, "GET", "/api/stats", None, None).await).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], json!({ "students": 1, "events": 0, "memories": 0, "departments": 6 }));
    }
}
