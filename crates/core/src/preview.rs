//! Preview link construction.

use crate::page_kind::PageKind;
use crate::types::DbId;

/// Builds frontend URLs for preview content rows.
///
/// Format: `{base_url}/{language}/{page_type}/preview/{content_id}`.
#[derive(Debug, Clone)]
pub struct PreviewUrlBuilder {
    base_url: String,
}

impl PreviewUrlBuilder {
    /// Create a builder for the given frontend base URL. Trailing slashes are
    /// ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn build(&self, language: &str, kind: PageKind, content_id: DbId) -> String {
        format!(
            "{}/{language}/{kind}/preview/{content_id}",
            self.base_url
        )
    }
}
