use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::Request;
use tower::ServiceExt;

use super::*;
use crate::backend::BackendError;
use crate::state::test_helpers::{BackendCall, MockBackend, test_app_state};

// =============================================================================
// Helpers
// =============================================================================

fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "full_name": "Ada Lovelace",
        "date_of_birth": "1815-12-10",
        "phone_number": "+44 20 7946 0958",
        "email": "ada@example.com",
        "password": "engine"
    })
}

async fn post_register(backend: Arc<MockBackend>, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let app = crate::routes::app(test_app_state(backend));
    let request = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// Status mapping
// =============================================================================

#[test]
fn registration_error_statuses() {
    assert_eq!(
        registration_error_to_status(&RegistrationError::IdentityCreationFailed("x".into())),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(registration_error_to_status(&RegistrationError::MissingIdentityId), StatusCode::BAD_GATEWAY);
    assert_eq!(
        registration_error_to_status(&RegistrationError::ProfileInsertFailed("x".into())),
        StatusCode::BAD_GATEWAY
    );
}

// =============================================================================
// Handler
// =============================================================================

#[tokio::test]
async fn register_success_returns_message_and_user() {
    let backend = Arc::new(MockBackend::succeeding("u-1"));
    let (status, json) = post_register(backend.clone(), valid_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Registration successful");
    assert_eq!(json["user"]["id"], "u-1");
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn register_identity_error_returns_error_body() {
    let backend = Arc::new(MockBackend::succeeding("u-1").with_create(Err(BackendError::Api {
        status: 422,
        message: "A user with this email address has already been registered".to_owned(),
    })));
    let (status, json) = post_register(backend, valid_body()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json, serde_json::json!({ "error": "A user with this email address has already been registered" }));
}

#[tokio::test]
async fn register_missing_field_never_reaches_backend() {
    let backend = Arc::new(MockBackend::succeeding("u-1"));
    let mut body = valid_body();
    body.as_object_mut().unwrap().remove("date_of_birth");

    let (status, json) = post_register(backend.clone(), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("date_of_birth"));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn register_insert_failure_rolls_back_identity() {
    let backend = Arc::new(MockBackend::succeeding("u-1").with_insert(Err(BackendError::Api {
        status: 403,
        message: "permission denied for table users".to_owned(),
    })));
    let (status, json) = post_register(backend.clone(), valid_body()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "permission denied for table users");
    assert_eq!(backend.calls().last(), Some(&BackendCall::Delete("u-1".to_owned())));
}

#[tokio::test]
async fn healthz_ok() {
    let app = crate::routes::app(test_app_state(Arc::new(MockBackend::succeeding("u-1"))));
    let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
