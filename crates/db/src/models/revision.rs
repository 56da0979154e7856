//! Revision ledger models and DTOs.

use folio_core::revision::PublishStatus;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `revisions` table. Never updated after insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Revision {
    pub id: DbId,
    pub content_id: DbId,
    pub author: String,
    pub message: String,
    pub description: Option<String>,
    pub publish_status: String,
    pub created_at: Timestamp,
}

/// A revision joined with the language and mode of the content it belongs to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevisionEntry {
    pub id: DbId,
    pub content_id: DbId,
    pub author: String,
    pub message: String,
    pub description: Option<String>,
    pub publish_status: String,
    pub created_at: Timestamp,
    pub language: String,
    pub mode: String,
}

/// Caller-supplied metadata for the revision written alongside a content row.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewRevision {
    #[validate(length(min = 1, max = 255))]
    pub author: String,
    #[validate(length(min = 1, max = 1000))]
    pub message: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    /// Defaults to [`PublishStatus::Published`].
    pub publish_status: Option<PublishStatus>,
}

impl NewRevision {
    pub fn status(&self) -> PublishStatus {
        self.publish_status.unwrap_or_default()
    }
}
