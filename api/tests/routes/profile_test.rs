#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, create_user, json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    #[tokio::test]
    async fn test_profile_lists_events_and_achievements() {
        let (app, state) = make_test_app().await;
        let organizer = create_user(state.db(), "org", Role::Organizer, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let auth = bearer(&student);

        let body = json!({ "title": "Robotics expo", "event_type": "technical", "event_date": "2099-02-01" });
        let event = json_body(send(&app, "POST", "/api/events", Some(&bearer(&organizer)), Some(body)).await).await;
        let uri = format!("/api/events/{}/register", event["data"]["id"]);
        send(&app, "POST", &uri, Some(&auth), None).await;
        let body = json!({ "title": "Chess champion", "achievement_type": "sports" });
        send(&app, "POST", "/api/achievements", Some(&auth), Some(body)).await;

        let response = send(&app, "GET", "/api/profile", Some(&auth), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["user"]["username"], "stud");
        assert_eq!(json["data"]["events"][0]["title"], "Robotics expo");
        assert_eq!(json["data"]["achievements"][0]["approved"], false);

        let response = send(&app, "GET", "/api/profile", None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let (app, state) = make_test_app().await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let auth = bearer(&student);

        let body = json!({ "full_name": "Asha K.", "bio": "Robotics club", "profile_pic": "me.png" });
        let response = send(&app, "PUT", "/api/profile", Some(&auth), Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["full_name"], "Asha K.");
        assert_eq!(json["data"]["bio"], "Robotics club");
        assert_eq!(json["data"]["year"], "SE");
        assert!(json["data"]["profile_pic"].as_str().unwrap().starts_with(&format!("pp_{}_", student.id)));

        let body = json!({ "full_name": "" });
        let response = send(&app, "PUT", "/api/profile", Some(&auth), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json!({ "profile_pic": "me.exe" });
        let response = send(&app, "PUT", "/api/profile", Some(&auth), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
