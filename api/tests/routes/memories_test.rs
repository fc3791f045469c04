#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, create_user, json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    // --- POST /api/memories ---

    #[tokio::test]
    async fn test_upload_keeps_only_images() {
        let (app, state) = make_test_app().await;
        let organizer = create_user(state.db(), "org", Role::Organizer, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;

        let body = json!({ "title": "Fest", "album": "Fest 2025", "files": ["a.jpg", "b.png", "notes.txt"] });
        let response = send(&app, "POST", "/api/memories", Some(&bearer(&organizer)), Some(body.clone())).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["message"], "2 photo(s) uploaded");
        assert_eq!(json["data"][0]["album"], "Fest 2025");
        assert_eq!(json["data"][0]["uploader_name"], "org full");

        let response = send(&app, "POST", "/api/memories", Some(&bearer(&student)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = json!({ "files": ["notes.txt"] });
        let response = send(&app, "POST", "/api/memories", Some(&bearer(&organizer)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json!({ "event_id": 9999, "files": ["a.jpg"] });
        let response = send(&app, "POST", "/api/memories", Some(&bearer(&organizer)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // --- POST /api/memories/{id}/like and GET /api/memories ---

    #[tokio::test]
    async fn test_like_toggles_and_shows_in_gallery() {
        let (app, state) = make_test_app().await;
        let organizer = create_user(state.db(), "org", Role::Organizer, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let auth = bearer(&student);

        let body = json!({ "files": ["a.jpg"] });
        let json = json_body(send(&app, "POST", "/api/memories", Some(&bearer(&organizer)), Some(body)).await).await;
        let id = json["data"][0]["id"].as_i64().unwrap();
        assert_eq!(json["data"][0]["album"], "General");
        let uri = format!("/api/memories/{id}/like");

        let json = json_body(send(&app, "POST", &uri, Some(&auth), None).await).await;
        assert_eq!(json["data"]["liked"], true);
        assert_eq!(json["data"]["likes"], 1);

        let gallery = json_body(send(&app, "GET", "/api/memories", Some(&auth), None).await).await;
        assert_eq!(gallery["data"]["memories"][0]["liked"], true);
        assert_eq!(gallery["data"]["memories"][0]["likes"], 1);
        assert_eq!(gallery["data"]["albums"], json!(["General"]));

        let anonymous = json_body(send(&app, "GET", "/api/memories", None, None).await).await;
        assert_eq!(anonymous["data"]["memories"][0]["liked"], false);

        let json = json_body(send(&app, "POST", &uri, Some(&auth), None).await).await;
        assert_eq!(json["data"]["liked"], false);
        assert_eq!(json["data"]["likes"], 0);

        let response = send(&app, "POST", "/api/memories/9999/like", Some(&auth), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, "POST", &uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_gallery_filters_by_album() {
        let (app, state) = make_test_app().await;
        let organizer = create_user(state.db(), "org", Role::Organizer, None).await;
        let auth = bearer(&organizer);
        for album in ["Sports", "Fest"] {
            let body = json!({ "album": album, "files": ["x.jpg"] });
            send(&app, "POST", "/api/memories", Some(&auth), Some(body)).await;
        }

        let json = json_body(send(&app, "GET", "/api/memories?album=Sports", None, None).await).await;
        let memories = json["data"]["memories"].as_array().unwrap();
        assert_eq!(memories.len(), 1);
        assert_eq!(memories[0]["album"], "Sports");
        assert_eq!(json["data"]["albums"].as_array().unwrap().len(), 2);
    }
}
