//! Content models: the row, its assembled sub-graph, and the editor draft.

use folio_core::content_mode::ContentMode;
use folio_core::error::CoreError;
use folio_core::naming::{
    normalize_category_code, normalize_category_name, normalize_url_path, validate_language,
};
use folio_core::page_kind::VersionedContent;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::ContentResult;
use crate::models::category::{CategoryInfo, CategoryRef};
use crate::models::component::{Component, ComponentInput};
use crate::models::meta_tag::{MetaTag, MetaTagInput};
use crate::models::revision::{NewRevision, Revision};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `page_contents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentRow {
    pub id: DbId,
    pub page_id: DbId,
    pub page_type: String,
    pub language: String,
    pub mode: String,
    pub title: String,
    pub url: String,
    pub url_alias: Option<String>,
    pub body: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContentRow {
    pub fn mode(&self) -> Result<ContentMode, CoreError> {
        self.mode.parse()
    }
}

/// A content row with everything it owns, as read back from storage.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    #[serde(flatten)]
    pub row: ContentRow,
    pub components: Vec<Component>,
    pub categories: Vec<CategoryInfo>,
    pub meta_tag: Option<MetaTag>,
    /// `None` only for preview rows.
    pub revision: Option<Revision>,
}

impl Content {
    /// Snapshot this content as a draft, for re-materializing it as a new row.
    ///
    /// Components and categories are carried by value; none of the source
    /// identities survive into the copy.
    pub fn to_draft(&self) -> ContentDraft {
        ContentDraft {
            language: self.row.language.clone(),
            title: self.row.title.clone(),
            url: self.row.url.clone(),
            url_alias: self.row.url_alias.clone(),
            body: self.row.body.clone(),
            components: self.components.iter().map(ComponentInput::from).collect(),
            categories: self.categories.iter().map(CategoryRef::from).collect(),
            meta_tag: self.meta_tag.as_ref().map(MetaTagInput::from),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Editor-supplied content for one language.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContentDraft {
    #[validate(length(min = 2, max = 16))]
    pub language: String,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub url: String,
    pub url_alias: Option<String>,
    #[serde(default = "empty_body")]
    pub body: serde_json::Value,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub components: Vec<ComponentInput>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub categories: Vec<CategoryRef>,
    #[serde(default)]
    pub meta_tag: Option<MetaTagInput>,
}

fn empty_body() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

impl ContentDraft {
    /// Validate and normalize this draft for page kind `K`.
    ///
    /// Returns a copy with a normalized URL/alias, a canonical body, and
    /// normalized category keys. Runs before any transaction is opened.
    pub fn prepared<K: VersionedContent>(&self) -> ContentResult<ContentDraft> {
        self.validate()?;
        for component in &self.components {
            component.validate()?;
        }
        for category in &self.categories {
            category.validate()?;
        }
        validate_language(&self.language)?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("Title must not be blank".to_string()).into());
        }

        let url = normalize_url_path(&self.url)?;
        let url_alias = match self.url_alias.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(alias) => Some(normalize_url_path(alias)?),
        };
        if url_alias.as_deref() == Some(url.as_str()) {
            return Err(CoreError::Validation(
                "URL alias must differ from the URL".to_string(),
            )
            .into());
        }

        let categories = self
            .categories
            .iter()
            .map(|c| {
                Ok(CategoryRef {
                    type_code: normalize_category_code(&c.type_code)?,
                    name: normalize_category_name(&c.name)?,
                    type_name: c.type_name.clone(),
                    is_localized: c.is_localized,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Ok(ContentDraft {
            language: self.language.clone(),
            title: title.to_string(),
            url,
            url_alias,
            body: K::check_body(&self.body)?,
            components: self.components.clone(),
            categories,
            meta_tag: self.meta_tag.clone(),
        })
    }
}

/// Query parameters addressing one content slot of a page.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentQuery {
    pub language: String,
    /// Defaults to [`ContentMode::Published`].
    pub mode: Option<ContentMode>,
}

impl ContentQuery {
    pub fn mode(&self) -> ContentMode {
        self.mode.unwrap_or(ContentMode::Published)
    }
}

/// Query parameters that only name a language.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageQuery {
    pub language: String,
}

/// Request body for replacing the published content of one language.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContent {
    /// Id of the published row the editor started from.
    pub prev_content_id: DbId,
    pub content: ContentDraft,
    pub revision: NewRevision,
}

/// Request body for copying a content row into another language.
#[derive(Debug, Clone, Deserialize)]
pub struct DuplicateToLanguage {
    pub language: String,
    pub revision: NewRevision,
}

/// Result of a preview write.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewLink {
    pub content_id: DbId,
    pub url: String,
}
