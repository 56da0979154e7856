//! Content-level operations of the versioning engine.
//!
//! Versioned writes (update, revert, duplicate-to-language) share one shape:
//! validate and snapshot outside the transaction, run the URL guard, then in
//! one transaction lock the current published row, demote it to history,
//! insert the new published graph with its revision, and stamp the page.

use folio_core::content_mode::ContentMode;
use folio_core::error::CoreError;
use folio_core::naming::{normalize_category_code, validate_language};
use folio_core::page_kind::VersionedContent;
use folio_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::ContentResult;
use crate::models::category::CategoryInfo;
use crate::models::content::{Content, ContentDraft, ContentRow, DuplicateToLanguage};
use crate::models::revision::{NewRevision, RevisionEntry};
use crate::repositories::content_graph::ContentGraph;
use crate::repositories::{CategoryRepo, PageRepo, RevisionRepo, UrlGuard};

/// Provides read, update, delete, revert, and cross-language copy of
/// content rows.
pub struct ContentRepo;

impl ContentRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The content of a page in one language and mode.
    ///
    /// For [`ContentMode::History`] the newest history row is returned.
    pub async fn find<K: VersionedContent>(
        pool: &PgPool,
        page_id: DbId,
        language: &str,
        mode: ContentMode,
    ) -> ContentResult<Content> {
        validate_language(language)?;
        let mut conn = pool.acquire().await?;
        PageRepo::require::<K>(&mut *conn, page_id).await?;

        let row = ContentGraph::find_row(&mut *conn, K::KIND, page_id, language, mode)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: page_id,
            })?;
        Ok(ContentGraph::load(&mut conn, row).await?)
    }

    /// The newest versioned content of a page in one language, whether it is
    /// currently published or not.
    pub async fn find_latest<K: VersionedContent>(
        pool: &PgPool,
        page_id: DbId,
        language: &str,
    ) -> ContentResult<Content> {
        validate_language(language)?;
        let mut conn = pool.acquire().await?;
        PageRepo::require::<K>(&mut *conn, page_id).await?;

        let row = ContentGraph::find_latest_row(&mut *conn, K::KIND, page_id, language)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: page_id,
            })?;
        Ok(ContentGraph::load(&mut conn, row).await?)
    }

    /// Categories of one type attached to a page's content.
    pub async fn categories<K: VersionedContent>(
        pool: &PgPool,
        page_id: DbId,
        type_code: &str,
        language: &str,
        mode: ContentMode,
    ) -> ContentResult<Vec<CategoryInfo>> {
        let code = normalize_category_code(type_code)?;
        validate_language(language)?;
        PageRepo::require::<K>(pool, page_id).await?;

        let row = ContentGraph::find_row(pool, K::KIND, page_id, language, mode)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: page_id,
            })?;
        Ok(CategoryRepo::list_for_content(pool, row.id, Some(&code)).await?)
    }

    /// Revision history of a page in one language, newest first.
    pub async fn revisions<K: VersionedContent>(
        pool: &PgPool,
        page_id: DbId,
        language: &str,
    ) -> ContentResult<Vec<RevisionEntry>> {
        validate_language(language)?;
        PageRepo::require::<K>(pool, page_id).await?;
        Ok(RevisionRepo::list_for_page(pool, K::KIND, page_id, language).await?)
    }

    // -----------------------------------------------------------------------
    // Versioned writes
    // -----------------------------------------------------------------------

    /// Replace the published content of one language.
    ///
    /// `prev_content_id` must name the row that is published right now;
    /// otherwise another writer got there first and the call fails with
    /// [`CoreError::Conflict`] without writing anything.
    pub async fn update<K: VersionedContent>(
        pool: &PgPool,
        page_id: DbId,
        prev_content_id: DbId,
        draft: &ContentDraft,
        revision: &NewRevision,
    ) -> ContentResult<Content> {
        revision.validate()?;
        let draft = draft.prepared::<K>()?;
        PageRepo::require::<K>(pool, page_id).await?;
        UrlGuard::ensure_available(
            pool,
            K::KIND,
            Some(page_id),
            &draft.url,
            draft.url_alias.as_deref(),
        )
        .await?;

        let mut tx = pool.begin().await?;

        let current = ContentGraph::lock_published(&mut tx, page_id, &draft.language).await?;
        let current = match current {
            Some(row) if row.id == prev_content_id => row,
            Some(row) => {
                return Err(CoreError::Conflict(format!(
                    "Content {prev_content_id} is no longer published for language '{}'; \
                     the current version is {}",
                    draft.language, row.id
                ))
                .into());
            }
            None => {
                return Err(CoreError::Conflict(format!(
                    "Page {page_id} has no published content for language '{}'",
                    draft.language
                ))
                .into());
            }
        };

        ContentGraph::demote(&mut tx, &current).await?;
        let content = ContentGraph::insert(
            &mut tx,
            page_id,
            K::KIND,
            ContentMode::Published,
            &draft,
            Some(revision),
        )
        .await?;
        ContentGraph::touch_page(&mut *tx, page_id).await?;

        tx.commit().await?;

        tracing::info!(
            page_id = %page_id,
            page_type = %K::KIND,
            language = %draft.language,
            demoted = %current.id,
            content_id = %content.row.id,
            "Content updated",
        );
        Ok(content)
    }

    /// Re-publish the content a revision was written with, as a new row with
    /// a new revision. The target revision and its row are left untouched.
    pub async fn revert<K: VersionedContent>(
        pool: &PgPool,
        revision_id: DbId,
        revision: &NewRevision,
    ) -> ContentResult<Content> {
        revision.validate()?;
        let not_found = || CoreError::NotFound {
            entity: "Revision",
            id: revision_id,
        };

        let target = RevisionRepo::find_by_id(pool, revision_id)
            .await?
            .ok_or_else(not_found)?;
        let snapshot = Self::snapshot::<K>(pool, target.content_id)
            .await?
            .ok_or_else(not_found)?;
        let page_id = snapshot.row.page_id;
        let draft = snapshot.to_draft();

        UrlGuard::ensure_available(
            pool,
            K::KIND,
            Some(page_id),
            &draft.url,
            draft.url_alias.as_deref(),
        )
        .await?;

        let content = Self::publish_new::<K>(pool, page_id, &draft, revision).await?;

        tracing::info!(
            page_id = %page_id,
            page_type = %K::KIND,
            language = %draft.language,
            revision_id = %revision_id,
            content_id = %content.row.id,
            "Content reverted",
        );
        Ok(content)
    }

    /// Copy a content row into another language of the same page.
    ///
    /// An existing published row in the target language is demoted to
    /// history. The source row is only read.
    pub async fn duplicate_to_language<K: VersionedContent>(
        pool: &PgPool,
        content_id: DbId,
        input: &DuplicateToLanguage,
    ) -> ContentResult<Content> {
        input.revision.validate()?;
        validate_language(&input.language)?;

        let snapshot = Self::snapshot::<K>(pool, content_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Content",
                id: content_id,
            })?;
        if snapshot.row.mode()? == ContentMode::Preview {
            return Err(CoreError::Validation(
                "Preview content cannot be duplicated".to_string(),
            )
            .into());
        }
        if snapshot.row.language == input.language {
            return Err(CoreError::Validation(format!(
                "Content {content_id} is already in language '{}'",
                input.language
            ))
            .into());
        }

        let page_id = snapshot.row.page_id;
        let mut draft = snapshot.to_draft();
        draft.language = input.language.clone();

        UrlGuard::ensure_available(
            pool,
            K::KIND,
            Some(page_id),
            &draft.url,
            draft.url_alias.as_deref(),
        )
        .await?;

        let content = Self::publish_new::<K>(pool, page_id, &draft, &input.revision).await?;

        tracing::info!(
            page_id = %page_id,
            page_type = %K::KIND,
            source_content_id = %content_id,
            language = %draft.language,
            content_id = %content.row.id,
            "Content duplicated to language",
        );
        Ok(content)
    }

    // -----------------------------------------------------------------------
    // Deletes
    // -----------------------------------------------------------------------

    /// Hard-delete the content of one language and mode. Returns the number
    /// of rows removed.
    ///
    /// Deleting the published row leaves the language without published
    /// content; no history row is promoted.
    pub async fn delete<K: VersionedContent>(
        pool: &PgPool,
        page_id: DbId,
        language: &str,
        mode: ContentMode,
    ) -> ContentResult<u64> {
        validate_language(language)?;
        PageRepo::require::<K>(pool, page_id).await?;

        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "DELETE FROM page_contents \
             WHERE page_id = $1 AND page_type = $2 AND language = $3 AND mode = $4",
        )
        .bind(page_id)
        .bind(K::KIND.as_str())
        .bind(language)
        .bind(mode.as_str())
        .execute(&mut *tx)
        .await?;

        let deleted = result.rows_affected();
        if deleted == 0 {
            return Err(CoreError::NotFound {
                entity: "Content",
                id: page_id,
            }
            .into());
        }
        if mode.is_versioned() {
            ContentGraph::touch_page(&mut *tx, page_id).await?;
        }

        tx.commit().await?;

        tracing::info!(
            page_id = %page_id,
            page_type = %K::KIND,
            language = %language,
            mode = %mode,
            deleted,
            "Content deleted",
        );
        Ok(deleted)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Read a content row and its sub-graph fresh from storage.
    async fn snapshot<K: VersionedContent>(
        pool: &PgPool,
        content_id: DbId,
    ) -> ContentResult<Option<Content>> {
        let mut conn = pool.acquire().await?;
        let row: Option<ContentRow> =
            ContentGraph::find_row_by_id(&mut *conn, K::KIND, content_id).await?;
        match row {
            Some(row) => Ok(Some(ContentGraph::load(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    /// Demote whatever is published for the draft's language (if anything)
    /// and publish the draft as a new row.
    ///
    /// The page row is locked first so concurrent writers to a language with
    /// no published row serialize instead of racing on the unique index.
    async fn publish_new<K: VersionedContent>(
        pool: &PgPool,
        page_id: DbId,
        draft: &ContentDraft,
        revision: &NewRevision,
    ) -> ContentResult<Content> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM pages WHERE id = $1 FOR UPDATE")
                .bind(page_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(CoreError::NotFound {
                entity: "Page",
                id: page_id,
            }
            .into());
        }

        if let Some(current) =
            ContentGraph::lock_published(&mut tx, page_id, &draft.language).await?
        {
            ContentGraph::demote(&mut tx, &current).await?;
        }
        let content = ContentGraph::insert(
            &mut tx,
            page_id,
            K::KIND,
            ContentMode::Published,
            draft,
            Some(revision),
        )
        .await?;
        ContentGraph::touch_page(&mut *tx, page_id).await?;

        tx.commit().await?;
        Ok(content)
    }
}
