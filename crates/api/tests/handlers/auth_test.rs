use axum::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

// Requests without a bearer token are rejected before any lookup.
#[rstest]
#[case("/api/admin/barbers")]
#[case("/api/admin/services")]
#[case("/api/admin/appointments")]
#[case("/api/admin/settings")]
#[case("/api/admin/admins")]
#[case("/api/auth/me")]
#[tokio::test]
async fn test_protected_routes_require_a_session(#[case] path: &str) {
    let server = TestContext::new().server();

    let response = server.get(path).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Authentication error: Missing bearer token" })
    );
}

#[tokio::test]
async fn test_admin_writes_require_a_session() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/admin/services")
        .json(&json!({ "name": "Corte", "duration_minutes": 30, "price_cents": 4000 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server.post("/api/auth/logout").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
