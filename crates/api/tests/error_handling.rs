//! Tests for `AppError` → problem+json response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use platter_api::error::{AppError, FieldError, PROBLEM_JSON};
use platter_core::error::CoreError;
use uuid::Uuid;

/// Convert an `AppError` into its status code, content type, and JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, String, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, content_type, json)
}

#[tokio::test]
async fn not_found_error_returns_problem_document() {
    let id = Uuid::nil();
    let err = AppError::Core(CoreError::NotFound { entity: "Order", id });

    let (status, content_type, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type, PROBLEM_JSON);
    assert_eq!(json["type"], "about:blank");
    assert_eq!(json["title"], "Not Found");
    assert_eq!(json["status"], 404);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["detail"], format!("Order with id {id} not found"));
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, _, json) = error_to_response(AppError::BadRequest("cart is empty".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["detail"], "cart is empty");
}

#[tokio::test]
async fn invalid_fields_lists_each_field() {
    let err = AppError::InvalidFields(vec![FieldError {
        field: "qty".into(),
        message: "qty must be between 1 and 99".into(),
    }]);

    let (status, _, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"][0]["field"], "qty");
    assert_eq!(json["errors"][0]["message"], "qty must be between 1 and 99");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("illegal transition".into()));

    let (status, _, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert!(json.get("errors").is_none());
}

#[tokio::test]
async fn auth_errors_hide_their_reason() {
    let (status, _, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("bad sig".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["detail"], "Authentication required");

    let (status, _, json) = error_to_response(AppError::Core(CoreError::Forbidden(
        "token tenant mismatch".into(),
    )))
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["detail"], "Access denied");
}

#[tokio::test]
async fn rate_limited_returns_429() {
    let (status, _, json) = error_to_response(AppError::RateLimited).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, _, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["detail"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, _, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
