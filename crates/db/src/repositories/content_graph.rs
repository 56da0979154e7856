//! Shared building blocks for writing and reading a content sub-graph.
//!
//! A content row owns its components, meta tag, category links, and (for
//! versioned rows) one revision. These helpers run on an open connection so
//! the engine operations can compose them inside a single transaction.

use folio_core::content_mode::ContentMode;
use folio_core::page_kind::PageKind;
use folio_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::error::ContentResult;
use crate::models::content::{Content, ContentDraft, ContentRow};
use crate::models::revision::NewRevision;
use crate::repositories::{CategoryRepo, ComponentRepo, MetaTagRepo, RevisionRepo};

/// Column list for `page_contents` queries.
pub(crate) const CONTENT_COLUMNS: &str = "id, page_id, page_type, language, mode, title, url, \
    url_alias, body, created_at, updated_at";

pub(crate) struct ContentGraph;

impl ContentGraph {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a content row with its whole sub-graph.
    ///
    /// `revision` must be `Some` for versioned modes and `None` for preview.
    pub(crate) async fn insert(
        conn: &mut PgConnection,
        page_id: DbId,
        kind: PageKind,
        mode: ContentMode,
        draft: &ContentDraft,
        revision: Option<&NewRevision>,
    ) -> Result<Content, sqlx::Error> {
        let query = format!(
            "INSERT INTO page_contents \
                (page_id, page_type, language, mode, title, url, url_alias, body) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {CONTENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContentRow>(&query)
            .bind(page_id)
            .bind(kind.as_str())
            .bind(&draft.language)
            .bind(mode.as_str())
            .bind(&draft.title)
            .bind(&draft.url)
            .bind(&draft.url_alias)
            .bind(&draft.body)
            .fetch_one(&mut *conn)
            .await?;

        let components = ComponentRepo::insert_all(conn, row.id, &draft.components).await?;
        CategoryRepo::attach_all(conn, row.id, &draft.categories, &draft.language).await?;
        let categories = CategoryRepo::list_for_content(&mut *conn, row.id, None).await?;
        let meta_tag = match &draft.meta_tag {
            Some(input) => Some(MetaTagRepo::insert(&mut *conn, row.id, input).await?),
            None => None,
        };
        let revision = match revision {
            Some(input) => Some(RevisionRepo::insert(&mut *conn, row.id, input).await?),
            None => None,
        };

        Ok(Content {
            row,
            components,
            categories,
            meta_tag,
            revision,
        })
    }

    /// Overwrite a preview row and its sub-graph in place.
    pub(crate) async fn overwrite(
        conn: &mut PgConnection,
        content_id: DbId,
        draft: &ContentDraft,
    ) -> Result<Content, sqlx::Error> {
        let query = format!(
            "UPDATE page_contents \
             SET title = $2, url = $3, url_alias = $4, body = $5 \
             WHERE id = $1 \
             RETURNING {CONTENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContentRow>(&query)
            .bind(content_id)
            .bind(&draft.title)
            .bind(&draft.url)
            .bind(&draft.url_alias)
            .bind(&draft.body)
            .fetch_one(&mut *conn)
            .await?;

        let components = ComponentRepo::replace_all(conn, row.id, &draft.components).await?;
        CategoryRepo::detach_all(&mut *conn, row.id).await?;
        CategoryRepo::attach_all(conn, row.id, &draft.categories, &draft.language).await?;
        let categories = CategoryRepo::list_for_content(&mut *conn, row.id, None).await?;
        let meta_tag = MetaTagRepo::replace(conn, row.id, draft.meta_tag.as_ref()).await?;

        Ok(Content {
            row,
            components,
            categories,
            meta_tag,
            revision: None,
        })
    }

    /// Lock the published row of a (page, language) for the rest of the
    /// transaction.
    pub(crate) async fn lock_published(
        conn: &mut PgConnection,
        page_id: DbId,
        language: &str,
    ) -> Result<Option<ContentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM page_contents \
             WHERE page_id = $1 AND language = $2 AND mode = 'published' \
             FOR UPDATE"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(page_id)
            .bind(language)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Move a row one step down the mode lattice (published -> history).
    pub(crate) async fn demote(conn: &mut PgConnection, row: &ContentRow) -> ContentResult<()> {
        let next = row.mode()?.demote()?;
        sqlx::query("UPDATE page_contents SET mode = $2 WHERE id = $1")
            .bind(row.id)
            .bind(next.as_str())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Bump `pages.updated_at` after a versioned change.
    pub(crate) async fn touch_page<'e>(
        executor: impl PgExecutor<'e>,
        page_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE pages SET updated_at = NOW() WHERE id = $1")
            .bind(page_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Newest row of a (page, language) in the given mode.
    pub(crate) async fn find_row<'e>(
        executor: impl PgExecutor<'e>,
        kind: PageKind,
        page_id: DbId,
        language: &str,
        mode: ContentMode,
    ) -> Result<Option<ContentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM page_contents \
             WHERE page_id = $1 AND page_type = $2 AND language = $3 AND mode = $4 \
             ORDER BY created_at DESC, id \
             LIMIT 1"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(page_id)
            .bind(kind.as_str())
            .bind(language)
            .bind(mode.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Newest versioned (non-preview) row of a (page, language).
    pub(crate) async fn find_latest_row<'e>(
        executor: impl PgExecutor<'e>,
        kind: PageKind,
        page_id: DbId,
        language: &str,
    ) -> Result<Option<ContentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM page_contents \
             WHERE page_id = $1 AND page_type = $2 AND language = $3 AND mode <> 'preview' \
             ORDER BY created_at DESC, id \
             LIMIT 1"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(page_id)
            .bind(kind.as_str())
            .bind(language)
            .fetch_optional(executor)
            .await
    }

    pub(crate) async fn find_row_by_id<'e>(
        executor: impl PgExecutor<'e>,
        kind: PageKind,
        id: DbId,
    ) -> Result<Option<ContentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM page_contents WHERE id = $1 AND page_type = $2"
        );
        sqlx::query_as::<_, ContentRow>(&query)
            .bind(id)
            .bind(kind.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Read the sub-graph of a row.
    pub(crate) async fn load(conn: &mut PgConnection, row: ContentRow) -> Result<Content, sqlx::Error> {
        let components = ComponentRepo::list_for_content(&mut *conn, row.id).await?;
        let categories = CategoryRepo::list_for_content(&mut *conn, row.id, None).await?;
        let meta_tag = MetaTagRepo::find_for_content(&mut *conn, row.id).await?;
        let revision = RevisionRepo::find_for_content(&mut *conn, row.id).await?;
        Ok(Content {
            row,
            components,
            categories,
            meta_tag,
            revision,
        })
    }

    /// Read the sub-graphs of several rows, preserving order.
    pub(crate) async fn load_all(
        conn: &mut PgConnection,
        rows: Vec<ContentRow>,
    ) -> Result<Vec<Content>, sqlx::Error> {
        let mut contents = Vec::with_capacity(rows.len());
        for row in rows {
            contents.push(Self::load(conn, row).await?);
        }
        Ok(contents)
    }
}

