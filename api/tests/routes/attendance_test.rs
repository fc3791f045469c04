#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, create_user, json_body, make_test_app, send};
    use axum::{Router, http::StatusCode};
    use chrono::{Duration, Utc};
    use db::models::attendance_session::{ActiveModel, Entity as SessionEntity};
    use db::models::user::Role;
    use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
    use serde_json::{Value, json};
    use serial_test::serial;
    use util::config::AppConfig;
    use util::state::AppState;

    async fn open_session(app: &Router, auth: &str) -> Value {
        let body = json!({ "subject": "Data Structures", "year": "SE", "room": "301" });
        let response = send(app, "POST", "/api/attendance/sessions", Some(auth), Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["data"].clone()
    }

    async fn backdate_expiry(state: &AppState, session_id: i64) {
        let session = SessionEntity::find_by_id(session_id)
            .one(state.db())
            .await
            .unwrap()
            .unwrap();
        let mut active: ActiveModel = session.into_active_model();
        active.expires_at = Set(Utc::now() - Duration::minutes(1));
        active.update(state.db()).await.unwrap();
    }

    // --- POST /api/attendance/sessions ---

    #[tokio::test]
    async fn test_create_session_returns_qr_payload() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;

        let data = open_session(&app, &bearer(&teacher)).await;
        let token = data["token"].as_str().unwrap();
        assert_eq!(token.len(), 12);
        assert!(token.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_eq!(data["department"], "Computer Engineering");
        assert_eq!(data["is_active"], true);
        assert!(data["qr_data"].as_str().unwrap().ends_with(&format!(":{token}")));
        assert_eq!(data["mark_path"], format!("/api/attendance/mark/{token}"));
    }

    #[tokio::test]
    async fn test_create_session_rejects_students_and_bad_input() {
        let (app, state) = make_test_app().await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;

        let body = json!({ "subject": "DS", "year": "SE" });
        let response = send(&app, "POST", "/api/attendance/sessions", Some(&bearer(&student)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = json!({ "subject": "DS", "year": "SE", "duration_minutes": 0 });
        let response = send(&app, "POST", "/api/attendance/sessions", Some(&bearer(&teacher)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json!({ "subject": "   ", "year": "SE" });
        let response = send(&app, "POST", "/api/attendance/sessions", Some(&bearer(&teacher)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_session_rejects_duration_over_max() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;

        let body = json!({ "subject": "DS", "year": "SE", "duration_minutes": 100_000 });
        let response = send(&app, "POST", "/api/attendance/sessions", Some(&bearer(&teacher)), Some(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn test_qr_data_uses_configured_app_id() {
        AppConfig::set_attendance_app_id("TEST-APP");
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;

        let data = open_session(&app, &bearer(&teacher)).await;
        AppConfig::reset();

        let token = data["token"].as_str().unwrap();
        assert_eq!(data["qr_data"], format!("TEST-APP:{token}"));
    }

    // --- GET|POST /api/attendance/mark/{token} ---

    #[tokio::test]
    async fn test_mark_then_already_marked() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let session = open_session(&app, &bearer(&teacher)).await;
        let uri = format!("/api/attendance/mark/{}", session["token"].as_str().unwrap());

        let first = send(&app, "POST", &uri, Some(&bearer(&student)), None).await;
        assert_eq!(first.status(), StatusCode::OK);
        let json = json_body(first).await;
        assert_eq!(json["message"], "Attendance marked for Data Structures");
        assert_eq!(json["data"]["already_marked"], false);

        let second = send(&app, "GET", &uri, Some(&bearer(&student)), None).await;
        assert_eq!(second.status(), StatusCode::OK);
        let json = json_body(second).await;
        assert_eq!(json["message"], "Attendance already marked for this session");
        assert_eq!(json["data"]["already_marked"], true);
    }

    #[tokio::test]
    async fn test_mark_error_statuses() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let session = open_session(&app, &bearer(&teacher)).await;
        let uri = format!("/api/attendance/mark/{}", session["token"].as_str().unwrap());

        let unknown = send(&app, "POST", "/api/attendance/mark/NOSUCHTOKEN1", Some(&bearer(&student)), None).await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(unknown).await["message"], "Attendance session is expired or invalid");

        let by_teacher = send(&app, "POST", &uri, Some(&bearer(&teacher)), None).await;
        assert_eq!(by_teacher.status(), StatusCode::FORBIDDEN);

        let anonymous = send(&app, "POST", &uri, None, None).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_mark_after_expiry_is_gone_and_deactivates() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let session = open_session(&app, &bearer(&teacher)).await;
        let session_id = session["id"].as_i64().unwrap();
        backdate_expiry(&state, session_id).await;

        let uri = format!("/api/attendance/mark/{}", session["token"].as_str().unwrap());
        let response = send(&app, "POST", &uri, Some(&bearer(&student)), None).await;
        assert_eq!(response.status(), StatusCode::GONE);
        assert_eq!(json_body(response).await["message"], "This attendance session has expired");

        let stored = SessionEntity::find_by_id(session_id)
            .one(state.db())
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_active);
    }

    // --- POST /api/attendance/sessions/{id}/close ---

    #[tokio::test]
    async fn test_close_session_blocks_marking() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let other = create_user(state.db(), "prof2", Role::Teacher, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let session = open_session(&app, &bearer(&teacher)).await;
        let close_uri = format!("/api/attendance/sessions/{}/close", session["id"]);

        let foreign = send(&app, "POST", &close_uri, Some(&bearer(&other)), None).await;
        assert_eq!(foreign.status(), StatusCode::OK);
        assert_eq!(json_body(foreign).await["data"]["closed"], false);

        let own = send(&app, "POST", &close_uri, Some(&bearer(&teacher)), None).await;
        assert_eq!(json_body(own).await["data"]["closed"], true);

        let again = send(&app, "POST", &close_uri, Some(&bearer(&teacher)), None).await;
        assert_eq!(json_body(again).await["data"]["closed"], false);

        let uri = format!("/api/attendance/mark/{}", session["token"].as_str().unwrap());
        let response = send(&app, "POST", &uri, Some(&bearer(&student)), None).await;
        assert_eq!(response.status(), StatusCode::GONE);
    }

    // --- GET /api/attendance/live/{token} ---

    #[tokio::test]
    async fn test_live_status_owner_only() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let other = create_user(state.db(), "prof2", Role::Teacher, None).await;
        let admin = create_user(state.db(), "root", Role::Admin, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let session = open_session(&app, &bearer(&teacher)).await;
        let token = session["token"].as_str().unwrap();

        send(&app, "POST", &format!("/api/attendance/mark/{token}"), Some(&bearer(&student)), None).await;

        let uri = format!("/api/attendance/live/{token}");
        let response = send(&app, "GET", &uri, Some(&bearer(&teacher)), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["is_active"], true);
        assert_eq!(json["data"]["recent"][0]["student_name"], "stud full");

        let foreign = send(&app, "GET", &uri, Some(&bearer(&other)), None).await;
        assert_eq!(foreign.status(), StatusCode::FORBIDDEN);

        let by_admin = send(&app, "GET", &uri, Some(&bearer(&admin)), None).await;
        assert_eq!(by_admin.status(), StatusCode::OK);

        let by_student = send(&app, "GET", &uri, Some(&bearer(&student)), None).await;
        assert_eq!(by_student.status(), StatusCode::FORBIDDEN);
    }

    // --- listing, detail and history ---

    #[tokio::test]
    async fn test_sessions_detail_and_student_history() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let present = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        create_user(state.db(), "absent", Role::Student, Some("SE")).await;
        let session = open_session(&app, &bearer(&teacher)).await;
        let token = session["token"].as_str().unwrap();
        send(&app, "POST", &format!("/api/attendance/mark/{token}"), Some(&bearer(&present)), None).await;

        let list = send(&app, "GET", "/api/attendance/sessions", Some(&bearer(&teacher)), None).await;
        assert_eq!(list.status(), StatusCode::OK);
        let json = json_body(list).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["present_count"], 1);

        let uri = format!("/api/attendance/sessions/{}", session["id"]);
        let detail = json_body(send(&app, "GET", &uri, Some(&bearer(&teacher)), None).await).await;
        assert_eq!(detail["data"]["present_count"], 1);
        assert_eq!(detail["data"]["total_students"], 2);
        assert_eq!(detail["data"]["records"][0]["roll_number"], "R-stud");

        let close_uri = format!("/api/attendance/sessions/{}/close", session["id"]);
        send(&app, "POST", &close_uri, Some(&bearer(&teacher)), None).await;

        let mine = send(&app, "GET", "/api/attendance/me", Some(&bearer(&present)), None).await;
        assert_eq!(mine.status(), StatusCode::OK);
        let json = json_body(mine).await;
        assert_eq!(json["data"]["attended"], 1);
        assert_eq!(json["data"]["total_sessions"], 1);
        assert_eq!(json["data"]["records"][0]["subject"], "Data Structures");
    }

    // --- GET /api/attendance/roster ---

    #[tokio::test]
    async fn test_roster_lists_department_students_with_counts() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        create_user(state.db(), "other", Role::Student, Some("SE")).await;
        let session = open_session(&app, &bearer(&teacher)).await;
        let uri = format!("/api/attendance/mark/{}", session["token"].as_str().unwrap());
        send(&app, "POST", &uri, Some(&bearer(&student)), None).await;

        let response = send(&app, "GET", "/api/attendance/roster", Some(&bearer(&teacher)), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["department"], "Computer Engineering");
        let rows: Vec<(&str, i64)> = json["data"]["students"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| (e["student"]["username"].as_str().unwrap(), e["attended"].as_i64().unwrap()))
            .collect();
        assert_eq!(rows, vec![("other", 0), ("stud", 1)]);

        let response = send(&app, "GET", "/api/attendance/roster", Some(&bearer(&student)), None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
