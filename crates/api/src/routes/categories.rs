//! Route definitions for the category taxonomy.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Category routes mounted at `/categories`.
///
/// ```text
/// GET    /                  -> list_categories (?type_code&language)
/// GET    /types             -> list_types
/// POST   /types             -> create_type
/// DELETE /types/{code}      -> delete_type
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list_categories))
        .route(
            "/types",
            get(categories::list_types).post(categories::create_type),
        )
        .route("/types/{code}", delete(categories::delete_type))
}
