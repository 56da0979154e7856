//! Handlers for FAQ, landing, and partner pages.
//!
//! Every handler is generic over the page kind; the router instantiates them
//! once per kind. Successful writes publish a [`PlatformEvent`] so the
//! notifier can email editors without delaying the response.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use folio_core::content_mode::ContentMode;
use folio_core::page_kind::VersionedContent;
use folio_core::types::DbId;
use folio_db::models::content::{
    ContentDraft, ContentQuery, DuplicateToLanguage, LanguageQuery, UpdateContent,
};
use folio_db::models::page::{CreatePage, DuplicatePage, PageListParams};
use folio_db::models::revision::NewRevision;
use folio_db::repositories::{ContentRepo, PageRepo, PreviewRepo};
use folio_events::bus::{
    CONTENT_DELETED, CONTENT_DUPLICATED, CONTENT_REVERTED, CONTENT_UPDATED, PAGE_CREATED,
    PAGE_DELETED, PAGE_DUPLICATED,
};
use folio_events::PlatformEvent;

use crate::error::AppResult;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// POST /api/v1/{kind}
///
/// Create a page with its first published content.
pub async fn create_page<K: VersionedContent>(
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<impl IntoResponse> {
    let created = PageRepo::create::<K>(&state.pool, &input).await?;

    state.event_bus.publish(
        PlatformEvent::page(PAGE_CREATED, K::KIND, created.page.id)
            .with_actor(&input.revision.author)
            .with_field("language", &input.content.language),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/{kind}
pub async fn list_pages<K: VersionedContent>(
    State(state): State<AppState>,
    Query(params): Query<PageListParams>,
) -> AppResult<impl IntoResponse> {
    let (data, total) = PageRepo::list::<K>(&state.pool, &params).await?;
    Ok(Json(PaginatedResponse { data, total }))
}

/// GET /api/v1/{kind}/{page_id}
pub async fn get_page<K: VersionedContent>(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = PageRepo::find_by_id::<K>(&state.pool, page_id).await?;
    Ok(Json(DataResponse { data: page }))
}

/// DELETE /api/v1/{kind}/{page_id}
pub async fn delete_page<K: VersionedContent>(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<StatusCode> {
    PageRepo::delete::<K>(&state.pool, page_id).await?;
    state
        .event_bus
        .publish(PlatformEvent::page(PAGE_DELETED, K::KIND, page_id));
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/{kind}/{page_id}/duplicate
pub async fn duplicate_page<K: VersionedContent>(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<DuplicatePage>,
) -> AppResult<impl IntoResponse> {
    let copy = PageRepo::duplicate::<K>(&state.pool, page_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::page(PAGE_DUPLICATED, K::KIND, copy.page.id)
            .with_actor(&input.author)
            .with_field("source_page_id", page_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: copy })))
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// GET /api/v1/{kind}/{page_id}/content?language=&mode=
pub async fn get_content<K: VersionedContent>(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Query(query): Query<ContentQuery>,
) -> AppResult<impl IntoResponse> {
    let content =
        ContentRepo::find::<K>(&state.pool, page_id, &query.language, query.mode()).await?;
    Ok(Json(DataResponse { data: content }))
}

/// GET /api/v1/{kind}/{page_id}/content/latest?language=
pub async fn get_latest_content<K: VersionedContent>(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Query(query): Query<LanguageQuery>,
) -> AppResult<impl IntoResponse> {
    let content = ContentRepo::find_latest::<K>(&state.pool, page_id, &query.language).await?;
    Ok(Json(DataResponse { data: content }))
}

/// PUT /api/v1/{kind}/{page_id}/content
///
/// Publish a new version. `prev_content_id` must be the currently published
/// row; a stale id is answered with 409.
pub async fn update_content<K: VersionedContent>(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<UpdateContent>,
) -> AppResult<impl IntoResponse> {
    let content = ContentRepo::update::<K>(
        &state.pool,
        page_id,
        input.prev_content_id,
        &input.content,
        &input.revision,
    )
    .await?;

    state.event_bus.publish(
        PlatformEvent::page(CONTENT_UPDATED, K::KIND, page_id)
            .with_actor(&input.revision.author)
            .with_field("content_id", content.row.id)
            .with_field("language", &content.row.language),
    );

    Ok(Json(DataResponse { data: content }))
}

/// DELETE /api/v1/{kind}/{page_id}/content?language=&mode=
pub async fn delete_content<K: VersionedContent>(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Query(query): Query<ContentQuery>,
) -> AppResult<StatusCode> {
    let mode = query.mode();
    ContentRepo::delete::<K>(&state.pool, page_id, &query.language, mode).await?;

    if mode != ContentMode::Preview {
        state.event_bus.publish(
            PlatformEvent::page(CONTENT_DELETED, K::KIND, page_id)
                .with_field("language", &query.language)
                .with_field("mode", mode),
        );
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/{kind}/{page_id}/categories/{type_code}?language=&mode=
pub async fn get_categories<K: VersionedContent>(
    State(state): State<AppState>,
    Path((page_id, type_code)): Path<(DbId, String)>,
    Query(query): Query<ContentQuery>,
) -> AppResult<impl IntoResponse> {
    let categories = ContentRepo::categories::<K>(
        &state.pool,
        page_id,
        &type_code,
        &query.language,
        query.mode(),
    )
    .await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/{kind}/{page_id}/revisions?language=
pub async fn list_revisions<K: VersionedContent>(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Query(query): Query<LanguageQuery>,
) -> AppResult<impl IntoResponse> {
    let revisions = ContentRepo::revisions::<K>(&state.pool, page_id, &query.language).await?;
    Ok(Json(DataResponse { data: revisions }))
}

/// POST /api/v1/{kind}/contents/{content_id}/duplicate
pub async fn duplicate_content<K: VersionedContent>(
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
    Json(input): Json<DuplicateToLanguage>,
) -> AppResult<impl IntoResponse> {
    let content = ContentRepo::duplicate_to_language::<K>(&state.pool, content_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::page(CONTENT_DUPLICATED, K::KIND, content.row.page_id)
            .with_actor(&input.revision.author)
            .with_field("source_content_id", content_id)
            .with_field("content_id", content.row.id)
            .with_field("language", &content.row.language),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: content })))
}

/// POST /api/v1/{kind}/revisions/{revision_id}/revert
pub async fn revert_content<K: VersionedContent>(
    State(state): State<AppState>,
    Path(revision_id): Path<DbId>,
    Json(input): Json<NewRevision>,
) -> AppResult<impl IntoResponse> {
    let content = ContentRepo::revert::<K>(&state.pool, revision_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::page(CONTENT_REVERTED, K::KIND, content.row.page_id)
            .with_actor(&input.author)
            .with_field("revision_id", revision_id)
            .with_field("content_id", content.row.id)
            .with_field("language", &content.row.language),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: content })))
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// POST /api/v1/{kind}/{page_id}/preview
///
/// Write the preview scratch row and return its frontend link. No event is
/// published: previews are not content changes.
pub async fn write_preview<K: VersionedContent>(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(draft): Json<ContentDraft>,
) -> AppResult<impl IntoResponse> {
    let link =
        PreviewRepo::write_scratch::<K>(&state.pool, page_id, &draft, &state.preview_urls).await?;
    Ok(Json(DataResponse { data: link }))
}

/// GET /api/v1/{kind}/{page_id}/preview?language=
pub async fn get_preview<K: VersionedContent>(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Query(query): Query<LanguageQuery>,
) -> AppResult<impl IntoResponse> {
    let content = PreviewRepo::find::<K>(&state.pool, page_id, &query.language).await?;
    Ok(Json(DataResponse { data: content }))
}
