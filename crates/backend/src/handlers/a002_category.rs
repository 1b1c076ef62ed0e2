use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_category::aggregate::{Category, CategoryDto};
use contracts::shared::api::StatusMessage;
use contracts::shared::list::ListResponse;

use crate::domain::a002_category::service::{self, CategoryFilter};
use crate::shared::actions::{ActionParams, StatusAction};
use crate::shared::error::ApiResult;
use crate::shared::state::AppState;

/// GET /api/categories
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> ApiResult<Json<ListResponse<Category>>> {
    Ok(Json(service::list(&state.store, &filter).await?))
}

/// GET /api/categories/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    Ok(Json(service::get_by_id(&state.store, &id).await?))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CategoryDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(dto) = body?;
    let category = service::create(&state.store, dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<CategoryDto>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Json(dto) = body?;
    Ok(Json(service::update(&state.store, &id, dto).await?))
}

/// DELETE /api/categories/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    Ok(Json(service::delete(&state.store, &id).await?))
}

/// PATCH /api/categories/:id?action=activate|deactivate
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ActionParams>,
) -> ApiResult<Json<StatusMessage>> {
    let action = StatusAction::parse(params.action.as_deref())?;
    let category = service::set_active(&state.store, &id, action).await?;
    Ok(Json(StatusMessage {
        message: format!("Category {} successfully", action.past_tense()),
        id: category.id,
        active: category.active,
    }))
}
