//! Page-level operations of the versioning engine.
//!
//! Every operation is generic over a [`VersionedContent`] kind, so a single
//! implementation serves FAQ, landing, and partner pages. Rows belonging to
//! another kind are treated as absent.

use folio_core::content_mode::ContentMode;
use folio_core::error::CoreError;
use folio_core::naming::{duplicate_url, validate_language};
use folio_core::page_kind::VersionedContent;
use folio_core::revision::duplicated_page_message;
use folio_core::types::DbId;
use sqlx::{PgExecutor, PgPool};
use validator::Validate;

use crate::error::ContentResult;
use crate::models::content::{ContentDraft, ContentRow};
use crate::models::page::{CreatePage, DuplicatePage, Page, PageListParams, PageSummary, PageWithContents};
use crate::models::revision::NewRevision;
use crate::repositories::content_graph::{ContentGraph, CONTENT_COLUMNS};
use crate::repositories::UrlGuard;

/// Column list for `pages` queries.
const COLUMNS: &str = "id, page_type, created_by, created_at, updated_at";

/// Provides creation, lookup, listing, deletion, and duplication of pages.
pub struct PageRepo;

impl PageRepo {
    /// Find a page row of kind `K`.
    pub async fn find_row<'e, K: VersionedContent>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1 AND page_type = $2");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(K::KIND.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Like [`find_row`](Self::find_row) but absent pages are an error.
    pub(crate) async fn require<'e, K: VersionedContent>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> ContentResult<Page> {
        Self::find_row::<K>(executor, id)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "Page", id }.into())
    }

    /// Create a page together with its first published content.
    pub async fn create<K: VersionedContent>(
        pool: &PgPool,
        input: &CreatePage,
    ) -> ContentResult<PageWithContents> {
        input.revision.validate()?;
        let draft = input.content.prepared::<K>()?;
        UrlGuard::ensure_available(pool, K::KIND, None, &draft.url, draft.url_alias.as_deref())
            .await?;

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO pages (page_type, created_by) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&query)
            .bind(K::KIND.as_str())
            .bind(input.revision.author.trim())
            .fetch_one(&mut *tx)
            .await?;

        let content = ContentGraph::insert(
            &mut tx,
            page.id,
            K::KIND,
            ContentMode::Published,
            &draft,
            Some(&input.revision),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            page_id = %page.id,
            page_type = %K::KIND,
            content_id = %content.row.id,
            language = %draft.language,
            "Page created",
        );

        Ok(PageWithContents {
            page,
            contents: vec![content],
        })
    }

    /// A page with its published content in every language.
    pub async fn find_by_id<K: VersionedContent>(
        pool: &PgPool,
        id: DbId,
    ) -> ContentResult<PageWithContents> {
        let mut conn = pool.acquire().await?;
        let page = Self::require::<K>(&mut *conn, id).await?;

        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM page_contents \
             WHERE page_id = $1 AND mode = 'published' \
             ORDER BY language"
        );
        let rows = sqlx::query_as::<_, ContentRow>(&query)
            .bind(id)
            .fetch_all(&mut *conn)
            .await?;
        let contents = ContentGraph::load_all(&mut conn, rows).await?;

        Ok(PageWithContents { page, contents })
    }

    /// List pages that have published content in the requested language.
    ///
    /// Returns the requested window and the total number of matches.
    pub async fn list<K: VersionedContent>(
        pool: &PgPool,
        params: &PageListParams,
    ) -> ContentResult<(Vec<PageSummary>, i64)> {
        validate_language(&params.language)?;
        let pattern = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let filter = "FROM pages p \
             JOIN page_contents c \
               ON c.page_id = p.id AND c.mode = 'published' AND c.language = $2 \
             WHERE p.page_type = $1 \
               AND ($3::text IS NULL OR c.title ILIKE $3 OR c.url ILIKE $3)";

        let query = format!(
            "SELECT p.id, p.page_type, p.created_by, p.created_at, p.updated_at, \
                    c.id AS content_id, c.language, c.title, c.url, c.url_alias \
             {filter} \
             ORDER BY {} \
             LIMIT $4 OFFSET $5",
            params.sort.order_by()
        );
        let items = sqlx::query_as::<_, PageSummary>(&query)
            .bind(K::KIND.as_str())
            .bind(&params.language)
            .bind(&pattern)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) {filter}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(K::KIND.as_str())
            .bind(&params.language)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        Ok((items, total.0))
    }

    /// Delete a page. Contents and everything they own cascade; shared
    /// categories survive.
    pub async fn delete<K: VersionedContent>(pool: &PgPool, id: DbId) -> ContentResult<()> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1 AND page_type = $2")
            .bind(id)
            .bind(K::KIND.as_str())
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound { entity: "Page", id }.into());
        }
        tracing::info!(page_id = %id, page_type = %K::KIND, "Page deleted");
        Ok(())
    }

    /// Deep-copy a page: the newest versioned content of every language is
    /// re-created under a new page with fresh identities throughout.
    ///
    /// Copied URLs and aliases get a `-copy-<id>` suffix. The source page is
    /// only read.
    pub async fn duplicate<K: VersionedContent>(
        pool: &PgPool,
        id: DbId,
        input: &DuplicatePage,
    ) -> ContentResult<PageWithContents> {
        input.validate()?;
        let new_page_id = uuid::Uuid::new_v4();

        let drafts = {
            let mut conn = pool.acquire().await?;
            Self::require::<K>(&mut *conn, id).await?;

            let query = format!(
                "SELECT DISTINCT ON (language) {CONTENT_COLUMNS} FROM page_contents \
                 WHERE page_id = $1 AND mode <> 'preview' \
                 ORDER BY language, created_at DESC, id"
            );
            let rows = sqlx::query_as::<_, ContentRow>(&query)
                .bind(id)
                .fetch_all(&mut *conn)
                .await?;
            ContentGraph::load_all(&mut conn, rows)
                .await?
                .iter()
                .map(|snapshot| copy_draft(snapshot.to_draft(), new_page_id))
                .collect::<Vec<_>>()
        };

        for draft in &drafts {
            UrlGuard::ensure_available(pool, K::KIND, None, &draft.url, draft.url_alias.as_deref())
                .await?;
        }

        let revision = NewRevision {
            author: input.author.clone(),
            message: duplicated_page_message(id),
            description: input.description.clone(),
            publish_status: None,
        };

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO pages (id, page_type, created_by) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&query)
            .bind(new_page_id)
            .bind(K::KIND.as_str())
            .bind(input.author.trim())
            .fetch_one(&mut *tx)
            .await?;

        let mut contents = Vec::with_capacity(drafts.len());
        for draft in &drafts {
            let content = ContentGraph::insert(
                &mut tx,
                page.id,
                K::KIND,
                ContentMode::Published,
                draft,
                Some(&revision),
            )
            .await?;
            contents.push(content);
        }

        tx.commit().await?;

        tracing::info!(
            source_page_id = %id,
            page_id = %page.id,
            page_type = %K::KIND,
            languages = contents.len(),
            "Page duplicated",
        );

        Ok(PageWithContents { page, contents })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn copy_draft(mut draft: ContentDraft, new_page_id: DbId) -> ContentDraft {
    draft.url = duplicate_url(&draft.url, new_page_id);
    draft.url_alias = draft
        .url_alias
        .as_deref()
        .map(|alias| duplicate_url(alias, new_page_id));
    draft
}

/// Wrap a search term for `ILIKE`, escaping its wildcards.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("reset"), "%reset%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn copy_draft_suffixes_url_and_alias() {
        let id = uuid::Uuid::parse_str("0123abcd-0000-0000-0000-000000000000").unwrap();
        let draft = ContentDraft {
            language: "en".to_string(),
            title: "Pricing".to_string(),
            url: "/pricing".to_string(),
            url_alias: Some("/prices".to_string()),
            body: serde_json::json!({}),
            components: vec![],
            categories: vec![],
            meta_tag: None,
        };
        let copy = copy_draft(draft, id);
        assert_eq!(copy.url, "/pricing-copy-0123abcd");
        assert_eq!(copy.url_alias.as_deref(), Some("/prices-copy-0123abcd"));
    }
}
