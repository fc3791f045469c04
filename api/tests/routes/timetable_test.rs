#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, create_user, json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    fn entry(day: &str, period: i32, teacher_id: i64) -> serde_json::Value {
        json!({
            "department": "Computer Engineering",
            "year": "SE",
            "semester": "3",
            "day": day,
            "period": period,
            "subject": "Operating Systems",
            "teacher_id": teacher_id,
            "room": "101",
            "time_from": "09:00",
            "time_to": "10:00"
        })
    }

    #[tokio::test]
    async fn test_add_and_view_timetable() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;
        let auth = bearer(&teacher);

        for (day, period) in [("Wednesday", 2), ("Wednesday", 1), ("Monday", 3)] {
            let response = send(&app, "POST", "/api/timetable", Some(&auth), Some(entry(day, period, teacher.id))).await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = send(&app, "GET", "/api/timetable", Some(&bearer(&student)), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let days = json["data"]["days"].as_array().unwrap();
        assert_eq!(days.len(), 6);
        assert_eq!(days[0]["day"], "Monday");
        assert_eq!(days[2]["day"], "Wednesday");
        assert_eq!(days[2]["entries"][0]["period"], 1);
        assert_eq!(days[2]["entries"][1]["period"], 2);
        assert_eq!(days[2]["entries"][0]["teacher_name"], "prof full");
        assert_eq!(days[2]["entries"][0]["time_from"], "09:00");
    }

    #[tokio::test]
    async fn test_add_entry_rejects_bad_input_and_students() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let student = create_user(state.db(), "stud", Role::Student, Some("SE")).await;

        let forbidden = send(&app, "POST", "/api/timetable", Some(&bearer(&student)), Some(entry("Monday", 1, teacher.id))).await;
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let mut bad_time = entry("Monday", 1, teacher.id);
        bad_time["time_from"] = json!("nine");
        let response = send(&app, "POST", "/api/timetable", Some(&bearer(&teacher)), Some(bad_time)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let mut reversed = entry("Monday", 1, teacher.id);
        reversed["time_to"] = json!("08:00");
        let response = send(&app, "POST", "/api/timetable", Some(&bearer(&teacher)), Some(reversed)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, "POST", "/api/timetable", Some(&bearer(&teacher)), Some(entry("Monday", 0, teacher.id))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "prof", Role::Teacher, None).await;
        let auth = bearer(&teacher);

        let created = send(&app, "POST", "/api/timetable", Some(&auth), Some(entry("Friday", 1, teacher.id))).await;
        let id = json_body(created).await["data"]["id"].as_i64().unwrap();

        let uri = format!("/api/timetable/{id}");
        assert_eq!(send(&app, "DELETE", &uri, Some(&auth), None).await.status(), StatusCode::OK);
        assert_eq!(send(&app, "DELETE", &uri, Some(&auth), None).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_picks_class_by_query() {
        let (app, state) = make_test_app().await;
        let admin = create_user(state.db(), "root", Role::Admin, None).await;

        let response = send(&app, "GET", "/api/timetable?department=Mechanical&year=TE", Some(&bearer(&admin)), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["department"], "Mechanical");
        assert_eq!(json["data"]["year"], "TE");
    }
}
