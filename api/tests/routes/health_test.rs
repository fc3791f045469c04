#[cfg(test)]
mod tests {
    use crate::helpers::{json_body, make_test_app, send};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_is_public() {
        let (app, _) = make_test_app().await;

        let response = send(&app, "GET", "/api/health", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["status"], "ok");
    }
}
