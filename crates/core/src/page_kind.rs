//! Page kinds and the per-kind content capability.
//!
//! The versioning engine is written once and parameterized by a
//! [`VersionedContent`] implementation. Each page kind contributes its
//! discriminator and a typed body schema; everything else (title, URL,
//! components, categories, meta tags, revisions) is shared.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// PageKind
// ---------------------------------------------------------------------------

/// Discriminator stored in `pages.page_type` and `page_contents.page_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Faq,
    Landing,
    Partner,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Faq => "faq",
            PageKind::Landing => "landing",
            PageKind::Partner => "partner",
        }
    }

    /// Landing and partner pages notify editors by email when their content
    /// or categories change.
    pub fn notifies_on_change(self) -> bool {
        matches!(self, PageKind::Landing | PageKind::Partner)
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "faq" => Ok(PageKind::Faq),
            "landing" => Ok(PageKind::Landing),
            "partner" => Ok(PageKind::Partner),
            other => Err(CoreError::Validation(format!(
                "Unknown page type '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// VersionedContent capability
// ---------------------------------------------------------------------------

/// A page kind that can be stored by the versioning engine.
pub trait VersionedContent: Send + Sync + 'static {
    /// Discriminator for rows belonging to this kind.
    const KIND: PageKind;

    /// Kind-specific body stored in `page_contents.body`.
    type Body: Serialize + DeserializeOwned + Send + Sync;

    /// Semantic checks that serde cannot express.
    fn validate_body(body: &Self::Body) -> Result<(), CoreError>;

    /// Parse a raw JSON body against this kind's schema, validate it, and
    /// return it in canonical form.
    fn check_body(raw: &serde_json::Value) -> Result<serde_json::Value, CoreError> {
        let body: Self::Body = serde_json::from_value(raw.clone()).map_err(|e| {
            CoreError::Validation(format!("Invalid {} body: {e}", Self::KIND))
        })?;
        Self::validate_body(&body)?;
        serde_json::to_value(&body).map_err(|e| CoreError::Internal(e.to_string()))
    }
}

/// FAQ pages: the title is the question.
pub struct Faq;

/// Marketing landing pages.
pub struct Landing;

/// Partner showcase pages.
pub struct Partner;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaqBody {
    pub answer: String,
    #[serde(default)]
    pub related_questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandingBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartnerBody {
    pub partner_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

impl VersionedContent for Faq {
    const KIND: PageKind = PageKind::Faq;
    type Body = FaqBody;

    fn validate_body(body: &FaqBody) -> Result<(), CoreError> {
        if body.answer.trim().is_empty() {
            return Err(CoreError::Validation(
                "FAQ answer must not be empty".to_string(),
            ));
        }
        if body.related_questions.iter().any(|q| q.trim().is_empty()) {
            return Err(CoreError::Validation(
                "Related questions must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

impl VersionedContent for Landing {
    const KIND: PageKind = PageKind::Landing;
    type Body = LandingBody;

    fn validate_body(body: &LandingBody) -> Result<(), CoreError> {
        if body.cta_label.is_some() != body.cta_url.is_some() {
            return Err(CoreError::Validation(
                "cta_label and cta_url must be provided together".to_string(),
            ));
        }
        Ok(())
    }
}

impl VersionedContent for Partner {
    const KIND: PageKind = PageKind::Partner;
    type Body = PartnerBody;

    fn validate_body(body: &PartnerBody) -> Result<(), CoreError> {
        if body.partner_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "partner_name must not be empty".to_string(),
            ));
        }
        if let Some(email) = &body.contact_email {
            if !email.contains('@') {
                return Err(CoreError::Validation(format!(
                    "contact_email '{email}' is not an email address"
                )));
            }
        }
        Ok(())
    }
}
