//! HTTP-level tests for the page routes, exercised through the FAQ kind.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    create_faq_page, delete, expect_status, faq_content_json, get, post_json, put_json,
    revision_json,
};
use folio_events::bus::{CONTENT_UPDATED, PAGE_CREATED};
use folio_events::EventBus;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_get_page(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (page_id, content_id) = create_faq_page(app.clone(), "/faq/reset-password").await;

    let json = expect_status(
        get(app.clone(), &format!("/api/v1/faq/{page_id}")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["page_type"], "faq");
    assert_eq!(json["data"]["created_by"], "editor@folio.test");

    let content = &json["data"]["contents"][0];
    assert_eq!(content["id"], content_id.as_str());
    assert_eq!(content["mode"], "published");
    assert_eq!(content["url"], "/faq/reset-password");
    assert_eq!(content["components"].as_array().unwrap().len(), 1);
    assert_eq!(content["categories"][0]["name"], "Account");
    assert_eq!(content["revision"]["message"], "Initial version");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn faq_page_is_not_visible_as_landing(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (page_id, _) = create_faq_page(app.clone(), "/faq/a").await;

    let json = expect_status(
        get(app, &format!("/api/v1/landing/{page_id}")).await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_body_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut content = faq_content_json("en", "Empty answer", "/faq/empty");
    content["body"] = json!({ "answer": "   " });

    let json = expect_status(
        post_json(
            app,
            "/api/v1/faq",
            json!({ "content": content, "revision": revision_json("Initial") }),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_url_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_faq_page(app.clone(), "/faq/taken").await;

    let json = expect_status(
        post_json(
            app,
            "/api/v1/faq",
            json!({
                "content": faq_content_json("en", "Another", "/faq/taken"),
                "revision": revision_json("Initial"),
            }),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("/faq/taken"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_data_and_total(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_faq_page(app.clone(), "/faq/one").await;
    create_faq_page(app.clone(), "/faq/two").await;

    let json = expect_status(
        get(app.clone(), "/api/v1/faq?language=en&limit=1").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = expect_status(
        get(app, "/api/v1/faq?language=en&search=two").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["url"], "/faq/two");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_stale_prev_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (page_id, first_id) = create_faq_page(app.clone(), "/faq/stale").await;
    let uri = format!("/api/v1/faq/{page_id}/content");

    let json = expect_status(
        put_json(
            app.clone(),
            &uri,
            json!({
                "prev_content_id": first_id,
                "content": faq_content_json("en", "Second", "/faq/stale"),
                "revision": revision_json("Second"),
            }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["title"], "Second");
    assert_ne!(json["data"]["id"], first_id.as_str());

    let json = expect_status(
        put_json(
            app.clone(),
            &uri,
            json!({
                "prev_content_id": first_id,
                "content": faq_content_json("en", "Third", "/faq/stale"),
                "revision": revision_json("Third"),
            }),
        )
        .await,
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(json["code"], "CONFLICT");

    let json = expect_status(
        get(app, &format!("{uri}?language=en&mode=history")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["id"], first_id.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revert_publishes_old_snapshot(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (page_id, first_id) = create_faq_page(app.clone(), "/faq/revert").await;

    let created = expect_status(
        get(app.clone(), &format!("/api/v1/faq/{page_id}")).await,
        StatusCode::OK,
    )
    .await;
    let revision_id = created["data"]["contents"][0]["revision"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    expect_status(
        put_json(
            app.clone(),
            &format!("/api/v1/faq/{page_id}/content"),
            json!({
                "prev_content_id": first_id,
                "content": faq_content_json("en", "Rewritten", "/faq/revert"),
                "revision": revision_json("Rewrite"),
            }),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    let json = expect_status(
        post_json(
            app.clone(),
            &format!("/api/v1/faq/revisions/{revision_id}/revert"),
            revision_json("Back to the first version"),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(json["data"]["title"], "How do I reset my password?");
    assert_eq!(json["data"]["mode"], "published");
    assert_ne!(json["data"]["id"], first_id.as_str());

    let revisions = expect_status(
        get(app, &format!("/api/v1/faq/{page_id}/revisions?language=en")).await,
        StatusCode::OK,
    )
    .await;
    let revisions = revisions["data"].as_array().unwrap();
    assert_eq!(revisions.len(), 3);
    assert_eq!(revisions[0]["message"], "Back to the first version");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_page_and_content(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (page_id, content_id) = create_faq_page(app.clone(), "/faq/source").await;

    let copy = expect_status(
        post_json(
            app.clone(),
            &format!("/api/v1/faq/{page_id}/duplicate"),
            json!({ "author": "editor@folio.test" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_ne!(copy["data"]["id"], page_id.as_str());
    let copied_url = copy["data"]["contents"][0]["url"].as_str().unwrap();
    assert!(copied_url.starts_with("/faq/source-copy-"), "got {copied_url}");

    let french = expect_status(
        post_json(
            app.clone(),
            &format!("/api/v1/faq/contents/{content_id}/duplicate"),
            json!({ "language": "fr", "revision": revision_json("French copy") }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(french["data"]["language"], "fr");
    assert_eq!(french["data"]["page_id"], page_id.as_str());

    let json = expect_status(
        post_json(
            app,
            &format!("/api/v1/faq/contents/{content_id}/duplicate"),
            json!({ "language": "en", "revision": revision_json("Same language") }),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn preview_returns_frontend_link(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (page_id, _) = create_faq_page(app.clone(), "/faq/preview").await;
    let uri = format!("/api/v1/faq/{page_id}/preview");

    let first = expect_status(
        post_json(
            app.clone(),
            &uri,
            faq_content_json("en", "Draft", "/faq/preview"),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    let preview_id = first["data"]["content_id"].as_str().unwrap().to_string();
    assert_eq!(
        first["data"]["url"],
        format!("https://www.folio.test/en/faq/preview/{preview_id}")
    );

    let second = expect_status(
        post_json(
            app.clone(),
            &uri,
            faq_content_json("en", "Draft two", "/faq/preview"),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(second["data"]["content_id"], preview_id.as_str());

    let json = expect_status(
        get(app, &format!("{uri}?language=en")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["title"], "Draft two");
    assert!(json["data"]["revision"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_content_and_page(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (page_id, _) = create_faq_page(app.clone(), "/faq/gone").await;

    let response = delete(
        app.clone(),
        &format!("/api/v1/faq/{page_id}/content?language=en"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    expect_status(
        get(
            app.clone(),
            &format!("/api/v1/faq/{page_id}/content?language=en"),
        )
        .await,
        StatusCode::NOT_FOUND,
    )
    .await;

    let response = delete(app.clone(), &format!("/api/v1/faq/{page_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(app, &format!("/api/v1/faq/{page_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn writes_publish_events(pool: PgPool) {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let app = common::build_test_app_with_bus(pool, Arc::clone(&bus));

    let (page_id, content_id) = create_faq_page(app.clone(), "/faq/events").await;

    let event = rx.try_recv().expect("page.created should be published");
    assert_eq!(event.event_type, PAGE_CREATED);
    assert_eq!(event.payload["page_type"], "faq");
    assert_eq!(event.actor.as_deref(), Some("editor@folio.test"));

    expect_status(
        put_json(
            app,
            &format!("/api/v1/faq/{page_id}/content"),
            json!({
                "prev_content_id": content_id,
                "content": faq_content_json("en", "Updated", "/faq/events"),
                "revision": revision_json("Update"),
            }),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    let event = rx.try_recv().expect("content.updated should be published");
    assert_eq!(event.event_type, CONTENT_UPDATED);
    assert_eq!(event.payload["language"], "en");
}
