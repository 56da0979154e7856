use std::sync::Arc;

use folio_core::preview::PreviewUrlBuilder;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: folio_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Content write events; consumed by the email notifier.
    pub event_bus: Arc<folio_events::EventBus>,
    pub preview_urls: Arc<PreviewUrlBuilder>,
}

impl AppState {
    pub fn new(
        pool: folio_db::DbPool,
        config: ServerConfig,
        event_bus: Arc<folio_events::EventBus>,
    ) -> Self {
        let preview_urls = Arc::new(PreviewUrlBuilder::new(config.frontend_base_url.clone()));
        Self {
            pool,
            config: Arc::new(config),
            event_bus,
            preview_urls,
        }
    }
}
