//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly; no server or database is needed.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use folio_api::error::AppError;
use folio_core::error::CoreError;
use folio_db::ContentError;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let id = uuid::Uuid::nil();
    let err = AppError::Core(CoreError::NotFound { entity: "Page", id });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("Page with id {id} not found"));
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("URL '/a' is already used".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "URL '/a' is already used");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("stale version".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn in_use_error_returns_409_with_own_code() {
    let err = AppError::Core(CoreError::InUse("type 'topic' is attached".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "IN_USE");
}

#[tokio::test]
async fn internal_error_is_sanitized() {
    let err = AppError::Core(CoreError::Internal("mode column corrupt".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn content_error_converts_by_variant() {
    let err: AppError = ContentError::Database(sqlx::Error::RowNotFound).into();
    let (status, _) = error_to_response(err).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let err: AppError = ContentError::Core(CoreError::Validation("bad".into())).into();
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad");
}

#[tokio::test]
async fn app_not_found_returns_404() {
    let err = AppError::NotFound("Category type 'season' not found".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[test]
fn content_error_keeps_core_variant() {
    let err: AppError = ContentError::Core(CoreError::InUse("topic".into())).into();
    assert_matches!(err, AppError::Core(CoreError::InUse(_)));

    let err: AppError = ContentError::Database(sqlx::Error::PoolTimedOut).into();
    assert_matches!(err, AppError::Database(sqlx::Error::PoolTimedOut));
}
