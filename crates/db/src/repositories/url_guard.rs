//! Published URL uniqueness check.
//!
//! Within one page kind, no two different pages may publish the same path,
//! whether as `url` or `url_alias`, in any combination. The check runs
//! before the write transaction opens and reads only published rows.
//!
//! No index enforces this across pages, so two concurrent writes claiming
//! the same path can both pass the check and both commit. Known race, same
//! as the pre-transaction check on update; it is not closed here.

use folio_core::error::CoreError;
use folio_core::page_kind::PageKind;
use folio_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::error::ContentResult;

#[derive(Debug, FromRow)]
struct Clash {
    page_id: DbId,
    url: String,
    url_alias: Option<String>,
}

/// Guards published URLs and aliases against collisions between pages.
pub struct UrlGuard;

impl UrlGuard {
    /// Fail with a validation error if `url` or `url_alias` is already
    /// published by another page of the same kind.
    ///
    /// `exclude_page` is the page being written; its own rows never clash,
    /// so an update may keep its URL.
    pub async fn ensure_available(
        pool: &PgPool,
        kind: PageKind,
        exclude_page: Option<DbId>,
        url: &str,
        url_alias: Option<&str>,
    ) -> ContentResult<()> {
        let mut candidates = vec![url.to_string()];
        if let Some(alias) = url_alias {
            candidates.push(alias.to_string());
        }

        let clash = sqlx::query_as::<_, Clash>(
            "SELECT page_id, url, url_alias FROM page_contents \
             WHERE page_type = $1 AND mode = 'published' \
               AND ($2::uuid IS NULL OR page_id <> $2) \
               AND (url = ANY($3) OR url_alias = ANY($3)) \
             LIMIT 1",
        )
        .bind(kind.as_str())
        .bind(exclude_page)
        .bind(&candidates)
        .fetch_optional(pool)
        .await?;

        let Some(clash) = clash else {
            return Ok(());
        };

        let taken = candidates
            .iter()
            .find(|c| **c == clash.url || clash.url_alias.as_deref() == Some(c.as_str()))
            .map(String::as_str)
            .unwrap_or(url);

        tracing::debug!(
            page_type = %kind,
            path = %taken,
            owner = %clash.page_id,
            "Published URL collision",
        );
        Err(CoreError::Validation(format!(
            "URL '{taken}' is already used by another {kind} page"
        ))
        .into())
    }
}
