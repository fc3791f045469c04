#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, create_user, json_body, make_test_app, send};
    use axum::{Router, http::StatusCode};
    use db::models::user::Role;
    use serde_json::{Value, json};

    async fn create_event(app: &Router, auth: &str, body: Value) -> Value {
        let response = send(app, "POST", "/api/events", Some(auth), Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["data"].clone()
    }

    fn hackathon(max: i32) -> Value {
        json!({
            "title": "Hackathon",
            "event_type": "technical",
            "event_date": "2099-03-01",
            "event_time": "10:00",
            "max_participants": max,
            "banner": "poster.png"
        })
    }

    // --- POST /api/events ---

    #[tokio::test]
    async fn test_create_event_defaults_and_guard() {
        let (app, state) = make_test_app().await;
        let organizer = create_user(state.db(), "org", Role::Organizer, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;

        let data = create_event(&app, &bearer(&organizer), hackathon(50)).await;
        assert_eq!(data["department"], "All");
        assert_eq!(data["status"], "upcoming");
        assert_eq!(data["organizer_name"], "org full");
        assert_eq!(data["event_time"], "10:00");
        assert!(data["banner_image"].as_str().unwrap().starts_with("ev_"));

        let response = send(&app, "POST", "/api/events", Some(&bearer(&student)), Some(hackathon(5))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let mut bad = hackathon(5);
        bad["event_date"] = json!("01/03/2099");
        let response = send(&app, "POST", "/api/events", Some(&bearer(&organizer)), Some(bad)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // --- POST /api/events/{id}/register ---

    #[tokio::test]
    async fn test_register_respects_capacity() {
        let (app, state) = make_test_app().await;
        let organizer = create_user(state.db(), "org", Role::Organizer, None).await;
        let first = create_user(state.db(), "s1", Role::Student, Some("SE")).await;
        let second = create_user(state.db(), "s2", Role::Student, Some("SE")).await;
        let event = create_event(&app, &bearer(&organizer), hackathon(1)).await;
        let uri = format!("/api/events/{}/register", event["id"]);

        let response = send(&app, "POST", &uri, Some(&bearer(&first)), None).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let again = send(&app, "POST", &uri, Some(&bearer(&first)), None).await;
        assert_eq!(again.status(), StatusCode::OK);
        assert_eq!(json_body(again).await["message"], "Already registered");

        let full = send(&app, "POST", &uri, Some(&bearer(&second)), None).await;
        assert_eq!(full.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(full).await["message"], "Event is full");

        let uri = format!("/api/events/{}/unregister", event["id"]);
        let response = send(&app, "POST", &uri, Some(&bearer(&first)), None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let uri = format!("/api/events/{}/register", event["id"]);
        let response = send(&app, "POST", &uri, Some(&bearer(&second)), None).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let missing = send(&app, "POST", "/api/events/9999/register", Some(&bearer(&second)), None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let anonymous = send(&app, "POST", &uri, None, None).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    }

    // --- GET /api/events ---

    #[tokio::test]
    async fn test_list_is_public_and_filtered() {
        let (app, state) = make_test_app().await;
        let organizer = create_user(state.db(), "org", Role::Organizer, None).await;
        let auth = bearer(&organizer);
        create_event(&app, &auth, hackathon(10)).await;
        create_event(
            &app,
            &auth,
            json!({ "title": "Cultural night", "event_type": "cultural", "event_date": "2099-04-01", "department": "Computer Engineering" }),
        )
        .await;

        let response = send(&app, "GET", "/api/events", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let titles: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Cultural night", "Hackathon"]);
        assert_eq!(json["data"][1]["registrations"], 0);

        let json = json_body(send(&app, "GET", "/api/events?type=technical", None, None).await).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let json = json_body(send(&app, "GET", "/api/events?q=cultural", None, None).await).await;
        assert_eq!(json["data"][0]["title"], "Cultural night");

        let json = json_body(send(&app, "GET", "/api/events?status=completed", None, None).await).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        let response = send(&app, "GET", "/api/events?status=someday", None, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // --- GET /api/events/{id} ---

    #[tokio::test]
    async fn test_detail_is_personalised_with_a_token() {
        let (app, state) = make_test_app().await;
        let organizer = create_user(state.db(), "org", Role::Organizer, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let event = create_event(&app, &bearer(&organizer), hackathon(10)).await;
        let uri = format!("/api/events/{}", event["id"]);
        send(&app, "POST", &format!("{uri}/register"), Some(&bearer(&student)), None).await;

        let json = json_body(send(&app, "GET", &uri, Some(&bearer(&student)), None).await).await;
        assert_eq!(json["data"]["is_registered"], true);
        assert_eq!(json["data"]["registrations"], 1);
        assert_eq!(json["data"]["attendees"][0]["full_name"], "stud full");

        let json = json_body(send(&app, "GET", &uri, None, None).await).await;
        assert_eq!(json["data"]["is_registered"], false);

        let response = send(&app, "GET", &uri, Some("Bearer not-a-token"), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(&app, "GET", "/api/events/9999", None, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
