//! Handlers for the category taxonomy.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use folio_db::models::category::{CategoryListParams, CreateCategoryType};
use folio_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories/types
pub async fn list_types(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let types = CategoryRepo::list_types(&state.pool).await?;
    Ok(Json(DataResponse { data: types }))
}

/// POST /api/v1/categories/types
pub async fn create_type(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryType>,
) -> AppResult<impl IntoResponse> {
    let created = CategoryRepo::create_type(&state.pool, &input).await?;
    tracing::info!(code = %created.code, "Category type created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// DELETE /api/v1/categories/types/{code}
///
/// Refused with 409 while any content row uses one of the type's categories.
pub async fn delete_type(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete_type(&state.pool, &code).await? {
        return Err(AppError::NotFound(format!("Category type '{code}' not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/categories?type_code=&language=
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_categories(
        &state.pool,
        &params.type_code,
        params.language.as_deref(),
    )
    .await?;
    Ok(Json(DataResponse { data: categories }))
}
