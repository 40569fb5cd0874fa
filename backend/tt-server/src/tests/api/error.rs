use crate::ApiError;

use tt_auth::AuthError;
use tt_core::CoreError;
use tt_db::DbError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::{StatusCode, header::WWW_AUTHENTICATE};
use http_body_util::BodyExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let response = ApiError::not_found("Task not found").into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Task not found");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let response = ApiError::validation("title", "title cannot be empty").into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "title");
}

#[tokio::test]
async fn test_unauthorized_sets_www_authenticate_header() {
    let response = ApiError::unauthorized("Incorrect email or password").into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_forbidden_returns_403() {
    let response = ApiError::forbidden("admins only").into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().get(WWW_AUTHENTICATE).is_none());

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let response = ApiError::internal("boom").into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_db_conflict_converts_to_bad_request() {
    let db_error = DbError::Conflict {
        message: "UNIQUE constraint failed: users.email".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let api_error: ApiError = db_error.into();

    assert_eq!(api_error.status(), StatusCode::BAD_REQUEST);
    // constraint text stays server-side
    assert!(!api_error.to_string().contains("users.email"));
}

#[test]
fn test_db_failure_converts_to_internal() {
    let db_error = DbError::Initialization {
        message: "disk full".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let api_error: ApiError = db_error.into();

    assert!(matches!(api_error, ApiError::Internal { ref message, .. } if message == "Database operation failed"));
}

#[tokio::test]
async fn test_expired_token_keeps_auth_error_code() {
    let auth_error = AuthError::TokenExpired {
        location: ErrorLocation::from(Location::caller()),
    };

    let response = ApiError::from(auth_error).into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "TOKEN_EXPIRED");
}

#[test]
fn test_password_hash_failure_is_internal() {
    let auth_error = AuthError::PasswordHash {
        message: "bad params".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    assert_eq!(
        ApiError::from(auth_error).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_invalid_status_converts_to_validation_on_status_field() {
    let core_error = CoreError::InvalidTaskStatus {
        value: "blocked".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    match ApiError::from(core_error) {
        ApiError::Validation { field, message, .. } => {
            assert_eq!(field.as_deref(), Some("status"));
            assert!(message.contains("blocked"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
