pub mod categories;
pub mod health;
pub mod pages;

use axum::Router;
use folio_core::page_kind::{Faq, Landing, Partner};

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /faq/...                 page routes for FAQ pages
/// /landing/...             page routes for landing pages
/// /partner/...             page routes for partner pages
/// /categories/...          category taxonomy
/// ```
///
/// The three page kinds share one generic router; see [`pages::router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/faq", pages::router::<Faq>())
        .nest("/landing", pages::router::<Landing>())
        .nest("/partner", pages::router::<Partner>())
        .nest("/categories", categories::router())
}
