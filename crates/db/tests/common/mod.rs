//! Shared fixtures for folio-db integration tests.

#![allow(dead_code)]

use folio_core::page_kind::Faq;
use folio_db::models::category::CategoryRef;
use folio_db::models::component::ComponentInput;
use folio_db::models::content::ContentDraft;
use folio_db::models::meta_tag::MetaTagInput;
use folio_db::models::page::{CreatePage, PageWithContents};
use folio_db::models::revision::NewRevision;
use folio_db::repositories::PageRepo;
use serde_json::json;
use sqlx::PgPool;

pub fn topic(name: &str) -> CategoryRef {
    CategoryRef {
        type_code: "topic".to_string(),
        name: name.to_string(),
        type_name: Some("Topic".to_string()),
        is_localized: Some(false),
    }
}

pub fn faq_draft(language: &str, title: &str, url: &str) -> ContentDraft {
    ContentDraft {
        language: language.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        url_alias: None,
        body: json!({ "answer": format!("Answer to {title}") }),
        components: vec![
            ComponentInput {
                component_type: "rich_text".to_string(),
                props: json!({ "html": "<p>Step one</p>" }),
            },
            ComponentInput {
                component_type: "video".to_string(),
                props: json!({ "src": "https://cdn.test/reset.mp4" }),
            },
        ],
        categories: vec![topic("Account")],
        meta_tag: Some(MetaTagInput {
            title: Some(title.to_string()),
            keywords: vec!["help".to_string()],
            ..Default::default()
        }),
    }
}

pub fn revision(message: &str) -> NewRevision {
    NewRevision {
        author: "editor@folio.test".to_string(),
        message: message.to_string(),
        description: None,
        publish_status: None,
    }
}

pub async fn create_faq(pool: &PgPool, url: &str) -> PageWithContents {
    let input = CreatePage {
        content: faq_draft("en", "How do I reset my password?", url),
        revision: revision("Initial version"),
    };
    PageRepo::create::<Faq>(pool, &input).await.unwrap()
}

pub async fn count(pool: &PgPool, sql: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(sql).fetch_one(pool).await.unwrap();
    row.0
}

pub async fn count_modes(pool: &PgPool, page_id: uuid::Uuid, language: &str, mode: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM page_contents WHERE page_id = $1 AND language = $2 AND mode = $3",
    )
    .bind(page_id)
    .bind(language)
    .bind(mode)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}
