//! Normalization rules for URLs, language codes, and category keys.
//!
//! Everything that participates in a uniqueness check or an upsert key is
//! normalized here first, so two spellings of the same value never produce
//! two rows.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a page URL or URL alias.
pub const MAX_URL_LENGTH: usize = 512;

/// Language tags: `en`, `de`, `pt-BR`.
static LANGUAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Z]{2})?$").expect("valid regex"));

/// URL paths: leading slash, then slash-separated lowercase segments.
static URL_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([a-z0-9._~-]+(/[a-z0-9._~-]+)*)?$").expect("valid regex"));

/// Category type codes: lowercase identifier.
static CATEGORY_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid regex"));

/// Validate a language tag (`en`, `pt-BR`).
pub fn validate_language(language: &str) -> Result<(), CoreError> {
    if LANGUAGE_RE.is_match(language) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid language code '{language}'"
        )))
    }
}

/// Normalize a page URL path.
///
/// Trims whitespace, lowercases, and strips a trailing slash (except for the
/// root path). The result must look like `/segment/segment`.
pub fn normalize_url_path(url: &str) -> Result<String, CoreError> {
    let mut normalized = url.trim().to_lowercase();
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    if normalized.len() > MAX_URL_LENGTH {
        return Err(CoreError::Validation(format!(
            "URL must not exceed {MAX_URL_LENGTH} characters"
        )));
    }
    if !URL_PATH_RE.is_match(&normalized) {
        return Err(CoreError::Validation(format!(
            "Invalid URL path '{url}': expected '/lowercase/segments'"
        )));
    }
    Ok(normalized)
}

/// Normalize a category type code: trim and lowercase.
pub fn normalize_category_code(code: &str) -> Result<String, CoreError> {
    let normalized = code.trim().to_lowercase();
    if !CATEGORY_CODE_RE.is_match(&normalized) {
        return Err(CoreError::Validation(format!(
            "Invalid category type code '{code}'"
        )));
    }
    Ok(normalized)
}

/// Normalize a category name: trim surrounding whitespace, must be non-empty.
pub fn normalize_category_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Category name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Language component of a category key.
///
/// Localized category types keep one category per language; all other types
/// share a single row across languages, keyed by the empty string.
pub fn category_language_key(is_localized: bool, language: &str) -> String {
    if is_localized {
        language.to_string()
    } else {
        String::new()
    }
}

/// URL given to a copy of a page so it does not collide with its source.
///
/// Convention: `{url}-copy-{first 8 hex chars of the new page id}`; the root
/// path becomes `/copy-{..}`. The base is shortened so the result never
/// exceeds [`MAX_URL_LENGTH`].
pub fn duplicate_url(url: &str, new_page_id: DbId) -> String {
    let simple = new_page_id.simple().to_string();
    let suffix = format!("-copy-{}", &simple[..8]);
    if url == "/" {
        return format!("/{}", &suffix[1..]);
    }

    let mut end = url.len().min(MAX_URL_LENGTH - suffix.len());
    while !url.is_char_boundary(end) {
        end -= 1;
    }
    let base = url[..end].trim_end_matches('/');
    format!("{base}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_language_tags() {
        assert!(validate_language("en").is_ok());
        assert!(validate_language("pt-BR").is_ok());
        assert!(validate_language("EN").is_err());
        assert!(validate_language("english").is_err());
        assert!(validate_language("").is_err());
    }

    #[test]
    fn normalizes_url_paths() {
        assert_eq!(
            normalize_url_path(" /FAQ/Reset-Password/ ").unwrap(),
            "/faq/reset-password"
        );
        assert_eq!(normalize_url_path("/").unwrap(), "/");
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(normalize_url_path("faq/reset").is_err());
        assert!(normalize_url_path("/faq//reset").is_err());
        assert!(normalize_url_path("/faq/reset password").is_err());
        assert!(normalize_url_path("https://example.com/faq").is_err());
    }

    #[test]
    fn rejects_overlong_urls() {
        let url = format!("/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(normalize_url_path(&url).is_err());
    }

    #[test]
    fn normalizes_category_codes() {
        assert_eq!(normalize_category_code(" Topic ").unwrap(), "topic");
        assert_eq!(normalize_category_code("audience_2").unwrap(), "audience_2");
        assert!(normalize_category_code("").is_err());
        assert!(normalize_category_code("two words").is_err());
    }

    #[test]
    fn category_names_are_trimmed() {
        assert_eq!(normalize_category_name("  Billing ").unwrap(), "Billing");
        assert!(normalize_category_name("   ").is_err());
    }

    #[test]
    fn language_key_only_for_localized_types() {
        assert_eq!(category_language_key(true, "de"), "de");
        assert_eq!(category_language_key(false, "de"), "");
    }

    #[test]
    fn duplicate_url_appends_page_prefix() {
        let id = uuid::Uuid::parse_str("0123abcd-0000-4000-8000-000000000000").unwrap();
        assert_eq!(duplicate_url("/faq/reset", id), "/faq/reset-copy-0123abcd");
        assert_eq!(duplicate_url("/", id), "/copy-0123abcd");
    }

    #[test]
    fn duplicate_url_stays_within_length_limit() {
        let id = uuid::Uuid::parse_str("0123abcd-0000-4000-8000-000000000000").unwrap();
        let url = format!("/{}", "a".repeat(MAX_URL_LENGTH - 6));

        let copy = duplicate_url(&url, id);
        assert_eq!(copy.len(), MAX_URL_LENGTH);
        assert!(copy.ends_with("-copy-0123abcd"));
        assert_eq!(normalize_url_path(&copy).unwrap(), copy);
    }

    #[test]
    fn duplicate_url_never_ends_base_with_slash() {
        let id = uuid::Uuid::parse_str("0123abcd-0000-4000-8000-000000000000").unwrap();
        // Cut point lands right after the separating slash.
        let head = "a".repeat(MAX_URL_LENGTH - 14 - 2);
        let url = format!("/{head}/{}", "b".repeat(20));

        let copy = duplicate_url(&url, id);
        assert!(copy.len() <= MAX_URL_LENGTH);
        assert_eq!(copy, format!("/{head}-copy-0123abcd"));
        assert!(normalize_url_path(&copy).is_ok());
    }
}
