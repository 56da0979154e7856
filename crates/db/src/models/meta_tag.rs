//! SEO meta tag entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `meta_tags` table. Owned 1:1 by a content row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MetaTag {
    pub id: DbId,
    pub content_id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub canonical_url: Option<String>,
    pub og_image_url: Option<String>,
    pub robots: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the meta tag carried by a content draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaTagInput {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub canonical_url: Option<String>,
    pub og_image_url: Option<String>,
    pub robots: Option<String>,
}

impl From<&MetaTag> for MetaTagInput {
    fn from(tag: &MetaTag) -> Self {
        Self {
            title: tag.title.clone(),
            description: tag.description.clone(),
            keywords: tag.keywords.clone(),
            canonical_url: tag.canonical_url.clone(),
            og_image_url: tag.og_image_url.clone(),
            robots: tag.robots.clone(),
        }
    }
}
