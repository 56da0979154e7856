//! Route definitions shared by every page kind.

use axum::routing::{get, post};
use axum::Router;
use folio_core::page_kind::VersionedContent;

use crate::handlers::pages;
use crate::state::AppState;

/// Page routes for kind `K`, mounted at `/{faq|landing|partner}`.
///
/// ```text
/// GET    /                                   -> list_pages
/// POST   /                                   -> create_page
/// GET    /{page_id}                          -> get_page
/// DELETE /{page_id}                          -> delete_page
/// POST   /{page_id}/duplicate                -> duplicate_page
/// GET    /{page_id}/content                  -> get_content (?language&mode)
/// PUT    /{page_id}/content                  -> update_content
/// DELETE /{page_id}/content                  -> delete_content (?language&mode)
/// GET    /{page_id}/content/latest           -> get_latest_content (?language)
/// GET    /{page_id}/categories/{type_code}   -> get_categories (?language&mode)
/// GET    /{page_id}/revisions                -> list_revisions (?language)
/// GET    /{page_id}/preview                  -> get_preview (?language)
/// POST   /{page_id}/preview                  -> write_preview
/// POST   /contents/{content_id}/duplicate    -> duplicate_content
/// POST   /revisions/{revision_id}/revert     -> revert_content
/// ```
pub fn router<K: VersionedContent>() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::list_pages::<K>).post(pages::create_page::<K>))
        .route(
            "/{page_id}",
            get(pages::get_page::<K>).delete(pages::delete_page::<K>),
        )
        .route("/{page_id}/duplicate", post(pages::duplicate_page::<K>))
        .route(
            "/{page_id}/content",
            get(pages::get_content::<K>)
                .put(pages::update_content::<K>)
                .delete(pages::delete_content::<K>),
        )
        .route(
            "/{page_id}/content/latest",
            get(pages::get_latest_content::<K>),
        )
        .route(
            "/{page_id}/categories/{type_code}",
            get(pages::get_categories::<K>),
        )
        .route("/{page_id}/revisions", get(pages::list_revisions::<K>))
        .route(
            "/{page_id}/preview",
            get(pages::get_preview::<K>).post(pages::write_preview::<K>),
        )
        .route(
            "/contents/{content_id}/duplicate",
            post(pages::duplicate_content::<K>),
        )
        .route(
            "/revisions/{revision_id}/revert",
            post(pages::revert_content::<K>),
        )
}
