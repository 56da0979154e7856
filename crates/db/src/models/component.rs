//! Component entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `components` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Component {
    pub id: DbId,
    pub content_id: DbId,
    pub position: i32,
    pub component_type: String,
    pub props: serde_json::Value,
    pub created_at: Timestamp,
}

/// A component as supplied by an editor. Position is its index in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ComponentInput {
    #[validate(length(min = 1, max = 100))]
    pub component_type: String,
    #[serde(default = "empty_props")]
    pub props: serde_json::Value,
}

fn empty_props() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

impl From<&Component> for ComponentInput {
    fn from(component: &Component) -> Self {
        Self {
            component_type: component.component_type.clone(),
            props: component.props.clone(),
        }
    }
}
