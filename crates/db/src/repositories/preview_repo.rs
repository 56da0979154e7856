//! Preview scratch space.
//!
//! Each (page, language) has at most one preview row. It is the only content
//! row that is ever rewritten in place, carries no revision, and never
//! produces history.

use folio_core::content_mode::ContentMode;
use folio_core::error::CoreError;
use folio_core::page_kind::VersionedContent;
use folio_core::preview::PreviewUrlBuilder;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::error::ContentResult;
use crate::models::content::{Content, ContentDraft, PreviewLink};
use crate::repositories::content_graph::ContentGraph;
use crate::repositories::ContentRepo;

/// Provides writes to and reads from the preview scratch row.
pub struct PreviewRepo;

impl PreviewRepo {
    /// Create or overwrite the preview row for the draft's language and
    /// return a link the frontend can render it from.
    ///
    /// The URL guard does not apply: preview URLs are never served.
    pub async fn write_scratch<K: VersionedContent>(
        pool: &PgPool,
        page_id: DbId,
        draft: &ContentDraft,
        urls: &PreviewUrlBuilder,
    ) -> ContentResult<PreviewLink> {
        let draft = draft.prepared::<K>()?;
        let mut tx = pool.begin().await?;

        // Serializes concurrent first previews of the same page.
        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM pages WHERE id = $1 AND page_type = $2 FOR UPDATE")
                .bind(page_id)
                .bind(K::KIND.as_str())
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(CoreError::NotFound {
                entity: "Page",
                id: page_id,
            }
            .into());
        }

        let existing = ContentGraph::find_row(
            &mut *tx,
            K::KIND,
            page_id,
            &draft.language,
            ContentMode::Preview,
        )
        .await?;

        let (content, created) = match existing {
            Some(row) => (ContentGraph::overwrite(&mut tx, row.id, &draft).await?, false),
            None => (
                ContentGraph::insert(
                    &mut tx,
                    page_id,
                    K::KIND,
                    ContentMode::Preview,
                    &draft,
                    None,
                )
                .await?,
                true,
            ),
        };

        tx.commit().await?;

        let content_id = content.row.id;
        tracing::info!(
            page_id = %page_id,
            page_type = %K::KIND,
            language = %draft.language,
            content_id = %content_id,
            created,
            "Preview written",
        );

        Ok(PreviewLink {
            content_id,
            url: urls.build(&draft.language, K::KIND, content_id),
        })
    }

    /// Read back the preview row of a page in one language.
    pub async fn find<K: VersionedContent>(
        pool: &PgPool,
        page_id: DbId,
        language: &str,
    ) -> ContentResult<Content> {
        ContentRepo::find::<K>(pool, page_id, language, ContentMode::Preview).await
    }
}
