//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`PlatformEvent`]s.
//! It is shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use folio_core::page_kind::PageKind;
use folio_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

pub const PAGE_CREATED: &str = "page.created";
pub const PAGE_DELETED: &str = "page.deleted";
pub const PAGE_DUPLICATED: &str = "page.duplicated";
pub const CONTENT_UPDATED: &str = "content.updated";
pub const CONTENT_REVERTED: &str = "content.reverted";
pub const CONTENT_DUPLICATED: &str = "content.duplicated";
pub const CONTENT_DELETED: &str = "content.deleted";

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred in the content store.
///
/// Constructed via [`PlatformEvent::new`] (or [`PlatformEvent::page`]) and
/// enriched with the builder methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"content.updated"`.
    pub event_type: String,

    /// Optional source entity kind (e.g. `"page"`).
    pub source_entity_type: Option<String>,

    pub source_entity_id: Option<DbId>,

    /// Author of the change, as recorded on the revision.
    pub actor: Option<String>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// An event about a page of the given kind.
    ///
    /// The payload carries `page_type` and `page_id`; further fields are
    /// added with [`with_field`](Self::with_field).
    pub fn page(event_type: impl Into<String>, kind: PageKind, page_id: DbId) -> Self {
        Self::new(event_type)
            .with_source("page", page_id)
            .with_payload(serde_json::json!({
                "page_type": kind.as_str(),
                "page_id": page_id,
            }))
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Replace the JSON payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Set one payload field. No-op if the payload is not an object.
    pub fn with_field(mut self, key: &str, value: impl Serialize) -> Self {
        if let (Some(map), Ok(value)) = (self.payload.as_object_mut(), serde_json::to_value(value)) {
            map.insert(key.to_string(), value);
        }
        self
    }

    /// The page kind named in the payload, if any.
    pub fn page_kind(&self) -> Option<PageKind> {
        self.payload
            .get("page_type")
            .and_then(serde_json::Value::as_str)
            .and_then(|s| s.parse().ok())
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use folio_events::bus::{EventBus, PlatformEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(PlatformEvent::new("page.created"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest messages are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. Dropped silently when
    /// nobody is listening.
    pub fn publish(&self, event: PlatformEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
