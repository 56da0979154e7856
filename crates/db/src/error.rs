//! Error type for multi-step engine operations.
//!
//! Leaf repositories return `sqlx::Error` directly. Engine operations also
//! produce domain failures (validation, not-found, conflict) before or
//! instead of touching the store, so they return [`ContentError`].

use folio_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A domain-level failure (validation, not found, conflict, in use).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any storage failure. The surrounding transaction has been rolled back.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ContentResult<T> = Result<T, ContentError>;

impl From<validator::ValidationErrors> for ContentError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ContentError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl ContentError {
    /// Whether this error means the addressed row does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::Core(CoreError::NotFound { .. })
                | ContentError::Database(sqlx::Error::RowNotFound)
        )
    }
}
