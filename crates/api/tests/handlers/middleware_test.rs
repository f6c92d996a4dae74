use axum::{
    body::to_bytes,
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use barbershop_api::middleware::{auth, error_handling::map_error};
use barbershop_core::errors::BookingError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case(BookingError::NotFound("Resource not found".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Authentication("Invalid password".into()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::Authorization("Not authorized".into()), StatusCode::FORBIDDEN)]
#[case(BookingError::Conflict("Email already registered".into()), StatusCode::CONFLICT)]
#[case(BookingError::SlotTaken("10:00".into()), StatusCode::CONFLICT)]
#[case(BookingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::other("Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] status: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), status);
}

async fn body_json(error: BookingError) -> Value {
    let response = map_error(error);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_only_slot_conflicts_are_retryable() {
    assert_eq!(
        body_json(BookingError::SlotTaken("2026-03-16 at 10:00".into())).await,
        json!({ "error": "Slot already taken: 2026-03-16 at 10:00", "retryable": true })
    );
    assert_eq!(
        body_json(BookingError::Conflict("Email already registered".into())).await,
        json!({ "error": "Conflict: Email already registered" })
    );
}

#[test]
fn test_hash_and_verify_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));

    assert!(auth::verify_password(password, &hashed).unwrap());
    assert!(!auth::verify_password("wrong_password", &hashed).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let first = auth::hash_password("same").unwrap();
    let second = auth::hash_password("same").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_corrupt_hash_is_an_error() {
    assert!(auth::verify_password("secret", "not-a-phc-string").is_err());
}

#[test]
fn test_session_tokens_are_random_alphanumerics() {
    let first = auth::generate_session_token();
    let second = auth::generate_session_token();

    assert_eq!(first.len(), 48);
    assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(first, second);
}

#[rstest]
#[case(Some("Bearer abc123"), Some("abc123"))]
#[case(Some("Bearer   "), None)]
#[case(Some("Basic dXNlcjpwYXNz"), None)]
#[case(None, None)]
fn test_bearer_token(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
    let mut builder = Request::builder().uri("/api/auth/me");
    if let Some(value) = header {
        builder = builder.header(AUTHORIZATION, value);
    }
    let (parts, _) = builder.body(()).unwrap().into_parts();

    assert_eq!(auth::bearer_token(&parts), expected);
}
