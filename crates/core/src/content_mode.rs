//! Content mode state machine.
//!
//! A content row is in exactly one of three modes. Versioned rows move in a
//! single direction (`Published` -> `History`); `Preview` rows live outside
//! that chain and are overwritten in place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle state of a content row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    Published,
    History,
    Preview,
}

impl ContentMode {
    /// Database representation (`page_contents.mode`).
    pub fn as_str(self) -> &'static str {
        match self {
            ContentMode::Published => "published",
            ContentMode::History => "history",
            ContentMode::Preview => "preview",
        }
    }

    /// Whether rows in this mode carry a revision and belong to the audit chain.
    pub fn is_versioned(self) -> bool {
        !matches!(self, ContentMode::Preview)
    }

    /// The mode a row moves to when a newer version replaces it.
    ///
    /// Only `Published` rows can be demoted. History rows are terminal and
    /// preview rows are never part of the version chain.
    pub fn demote(self) -> Result<ContentMode, CoreError> {
        match self {
            ContentMode::Published => Ok(ContentMode::History),
            other => Err(CoreError::Internal(format!(
                "Cannot demote content in mode '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(ContentMode::Published),
            "history" => Ok(ContentMode::History),
            "preview" => Ok(ContentMode::Preview),
            other => Err(CoreError::Validation(format!(
                "Unknown content mode '{other}', expected one of: published, history, preview"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_demotes_to_history() {
        assert_eq!(
            ContentMode::Published.demote().unwrap(),
            ContentMode::History
        );
    }

    #[test]
    fn history_cannot_be_demoted() {
        assert!(ContentMode::History.demote().is_err());
    }

    #[test]
    fn preview_is_outside_the_chain() {
        assert!(ContentMode::Preview.demote().is_err());
        assert!(!ContentMode::Preview.is_versioned());
        assert!(ContentMode::History.is_versioned());
    }

    #[test]
    fn parses_database_values() {
        for mode in [
            ContentMode::Published,
            ContentMode::History,
            ContentMode::Preview,
        ] {
            assert_eq!(mode.as_str().parse::<ContentMode>().unwrap(), mode);
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!("draft".parse::<ContentMode>().is_err());
        assert!("Published".parse::<ContentMode>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ContentMode::History).unwrap();
        assert_eq!(json, "\"history\"");
    }
}
