//! Repository for the `revisions` ledger.
//!
//! Revisions are append-only. Each versioned content row gets exactly one,
//! written in the same transaction as the row itself; preview rows get none.

use folio_core::page_kind::PageKind;
use folio_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::revision::{NewRevision, Revision, RevisionEntry};

/// Column list for `revisions` queries.
const COLUMNS: &str = "id, content_id, author, message, description, publish_status, created_at";

/// Provides append and lookup for revision records.
pub struct RevisionRepo;

impl RevisionRepo {
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        content_id: DbId,
        input: &NewRevision,
    ) -> Result<Revision, sqlx::Error> {
        let query = format!(
            "INSERT INTO revisions (content_id, author, message, description, publish_status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(content_id)
            .bind(input.author.trim())
            .bind(&input.message)
            .bind(&input.description)
            .bind(input.status().as_str())
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Revision>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM revisions WHERE id = $1");
        sqlx::query_as::<_, Revision>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_for_content<'e>(
        executor: impl PgExecutor<'e>,
        content_id: DbId,
    ) -> Result<Option<Revision>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM revisions WHERE content_id = $1");
        sqlx::query_as::<_, Revision>(&query)
            .bind(content_id)
            .fetch_optional(executor)
            .await
    }

    /// Revision history of one (page, language), newest first.
    pub async fn list_for_page<'e>(
        executor: impl PgExecutor<'e>,
        kind: PageKind,
        page_id: DbId,
        language: &str,
    ) -> Result<Vec<RevisionEntry>, sqlx::Error> {
        sqlx::query_as::<_, RevisionEntry>(
            "SELECT r.id, r.content_id, r.author, r.message, r.description, \
                    r.publish_status, r.created_at, pc.language, pc.mode \
             FROM revisions r \
             JOIN page_contents pc ON pc.id = r.content_id \
             WHERE pc.page_id = $1 AND pc.page_type = $2 AND pc.language = $3 \
             ORDER BY r.created_at DESC, r.id",
        )
        .bind(page_id)
        .bind(kind.as_str())
        .bind(language)
        .fetch_all(executor)
        .await
    }
}
