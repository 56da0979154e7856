//! Shared helpers for folio-api integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_events::EventBus;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        frontend_base_url: "https://www.folio.test".to_string(),
        notify_recipients: vec![],
    }
}

/// Build the production router against the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool, Arc::new(EventBus::default()))
}

/// Like [`build_test_app`] but with a caller-owned bus, so tests can
/// subscribe to published events.
pub fn build_test_app_with_bus(pool: PgPool, event_bus: Arc<EventBus>) -> Router {
    build_app_router(AppState::new(pool, test_config(), event_bus))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the parsed body.
pub async fn expect_status(response: Response, status: StatusCode) -> Value {
    let actual = response.status();
    let json = body_json(response).await;
    assert_eq!(actual, status, "unexpected status, body: {json}");
    json
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

pub fn revision_json(message: &str) -> Value {
    json!({
        "author": "editor@folio.test",
        "message": message,
    })
}

pub fn faq_content_json(language: &str, title: &str, url: &str) -> Value {
    json!({
        "language": language,
        "title": title,
        "url": url,
        "body": { "answer": "Use the reset link on the sign-in page." },
        "components": [
            { "component_type": "rich_text", "props": { "html": "<p>Step one</p>" } }
        ],
        "categories": [
            { "type_code": "topic", "name": "Account", "type_name": "Topic" }
        ],
        "meta_tag": { "title": title, "keywords": ["help"] }
    })
}

/// Create an FAQ page through the API; returns `(page_id, content_id)`.
pub async fn create_faq_page(app: Router, url: &str) -> (String, String) {
    let response = post_json(
        app,
        "/api/v1/faq",
        json!({
            "content": faq_content_json("en", "How do I reset my password?", url),
            "revision": revision_json("Initial version"),
        }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    let page_id = json["data"]["id"].as_str().unwrap().to_string();
    let content_id = json["data"]["contents"][0]["id"].as_str().unwrap().to_string();
    (page_id, content_id)
}
