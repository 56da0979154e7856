//! Repository for the `meta_tags` table.

use folio_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::meta_tag::{MetaTag, MetaTagInput};

/// Column list for `meta_tags` queries.
const COLUMNS: &str = "id, content_id, title, description, keywords, canonical_url, \
    og_image_url, robots, created_at, updated_at";

/// Provides persistence for the SEO tag owned by a content row.
pub struct MetaTagRepo;

impl MetaTagRepo {
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        content_id: DbId,
        input: &MetaTagInput,
    ) -> Result<MetaTag, sqlx::Error> {
        let query = format!(
            "INSERT INTO meta_tags \
                (content_id, title, description, keywords, canonical_url, og_image_url, robots) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MetaTag>(&query)
            .bind(content_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.keywords)
            .bind(&input.canonical_url)
            .bind(&input.og_image_url)
            .bind(&input.robots)
            .fetch_one(executor)
            .await
    }

    pub async fn find_for_content<'e>(
        executor: impl PgExecutor<'e>,
        content_id: DbId,
    ) -> Result<Option<MetaTag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meta_tags WHERE content_id = $1");
        sqlx::query_as::<_, MetaTag>(&query)
            .bind(content_id)
            .fetch_optional(executor)
            .await
    }

    /// Replace the meta tag of a content row. `None` removes it.
    pub async fn replace(
        conn: &mut PgConnection,
        content_id: DbId,
        input: Option<&MetaTagInput>,
    ) -> Result<Option<MetaTag>, sqlx::Error> {
        sqlx::query("DELETE FROM meta_tags WHERE content_id = $1")
            .bind(content_id)
            .execute(&mut *conn)
            .await?;
        match input {
            Some(input) => Self::insert(&mut *conn, content_id, input).await.map(Some),
            None => Ok(None),
        }
    }
}
