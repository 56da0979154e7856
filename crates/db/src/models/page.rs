//! Page aggregate models and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::content::{Content, ContentDraft};
use crate::models::revision::NewRevision;

/// Default page size for page listing.
pub const DEFAULT_LIMIT: i64 = 20;

/// Maximum page size for page listing.
pub const MAX_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub page_type: String,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A page with its currently published content, one entry per language.
#[derive(Debug, Clone, Serialize)]
pub struct PageWithContents {
    #[serde(flatten)]
    pub page: Page,
    pub contents: Vec<Content>,
}

/// One row of a page listing: the page joined with its published content in
/// the requested language.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageSummary {
    pub id: DbId,
    pub page_type: String,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub content_id: DbId,
    pub language: String,
    pub title: String,
    pub url: String,
    pub url_alias: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a page with its first published content.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePage {
    #[validate(nested)]
    pub content: ContentDraft,
    #[validate(nested)]
    pub revision: NewRevision,
}

/// DTO for deep-copying a page. The revision message is generated.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DuplicatePage {
    #[validate(length(min = 1, max = 255))]
    pub author: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

/// Sort orders accepted by the page listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSort {
    #[default]
    CreatedDesc,
    CreatedAsc,
    UpdatedDesc,
    TitleAsc,
    TitleDesc,
}

impl PageSort {
    /// `ORDER BY` clause for the listing query (`p` = pages, `c` = contents).
    pub fn order_by(self) -> &'static str {
        match self {
            PageSort::CreatedDesc => "p.created_at DESC, p.id",
            PageSort::CreatedAsc => "p.created_at ASC, p.id",
            PageSort::UpdatedDesc => "p.updated_at DESC, p.id",
            PageSort::TitleAsc => "c.title ASC, p.id",
            PageSort::TitleDesc => "c.title DESC, p.id",
        }
    }
}

/// Query parameters for listing pages of one kind.
#[derive(Debug, Clone, Deserialize)]
pub struct PageListParams {
    /// Only pages with published content in this language are listed.
    pub language: String,
    /// Case-insensitive match against title and URL.
    pub search: Option<String>,
    #[serde(default)]
    pub sort: PageSort,
    /// Maximum results. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

impl PageListParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>) -> PageListParams {
        PageListParams {
            language: "en".to_string(),
            search: None,
            sort: PageSort::default(),
            limit,
            offset,
        }
    }

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(params(None, None).limit(), DEFAULT_LIMIT);
        assert_eq!(params(Some(0), None).limit(), 1);
        assert_eq!(params(Some(10_000), None).limit(), MAX_LIMIT);
    }

    #[test]
    fn negative_offset_is_zero() {
        assert_eq!(params(None, Some(-5)).offset(), 0);
        assert_eq!(params(None, Some(40)).offset(), 40);
    }

    #[test]
    fn sort_parses_snake_case() {
        let sort: PageSort = serde_json::from_str("\"title_asc\"").unwrap();
        assert_eq!(sort.order_by(), "c.title ASC, p.id");
    }
}
