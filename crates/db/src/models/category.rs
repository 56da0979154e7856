//! Category taxonomy models and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `category_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryType {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub is_localized: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub category_type_id: DbId,
    pub name: String,
    /// Empty for categories of non-localized types.
    pub language: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category attached to a content row, joined with its type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryInfo {
    pub id: DbId,
    pub name: String,
    pub language: String,
    pub type_code: String,
    pub type_name: String,
    pub is_localized: bool,
    pub position: i32,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// A category reference inside a content draft.
///
/// Categories are attached by value: the type is looked up (or created) by
/// `type_code`, then the category by name within that type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryRef {
    #[validate(length(min = 1, max = 64))]
    pub type_code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Display name used only when the type does not exist yet.
    pub type_name: Option<String>,
    /// Localization flag used only when the type does not exist yet.
    pub is_localized: Option<bool>,
}

impl From<&CategoryInfo> for CategoryRef {
    fn from(info: &CategoryInfo) -> Self {
        Self {
            type_code: info.type_code.clone(),
            name: info.name.clone(),
            type_name: Some(info.type_name.clone()),
            is_localized: Some(info.is_localized),
        }
    }
}

/// DTO for creating a category type explicitly.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryType {
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub is_localized: Option<bool>,
}

/// Query parameters for `GET /api/v1/categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryListParams {
    pub type_code: String,
    pub language: Option<String>,
}
