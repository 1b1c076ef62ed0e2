use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a004_option::aggregate::{
    OptionDto, OptionGroupDto, OptionGroupSummary, OptionItem,
};
use contracts::shared::api::ExistsResponse;
use contracts::shared::list::ListResponse;

use crate::domain::a004_option::service::{self, LocaleParams, OptionFilter};
use crate::shared::error::ApiResult;
use crate::shared::state::AppState;

/// GET /api/options
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<OptionFilter>,
) -> ApiResult<Json<ListResponse<OptionItem>>> {
    Ok(Json(service::list(&state.store, &filter).await?))
}

/// POST /api/options
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<OptionDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OptionItem>)> {
    let Json(dto) = body?;
    let option = service::create(&state.store, dto).await?;
    Ok((StatusCode::CREATED, Json(option)))
}

/// GET /api/options/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OptionItem>> {
    Ok(Json(service::get_by_id(&state.store, &id).await?))
}

/// PUT /api/options/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<OptionDto>, JsonRejection>,
) -> ApiResult<Json<OptionItem>> {
    let Json(dto) = body?;
    Ok(Json(service::update(&state.store, &id, dto).await?))
}

/// DELETE /api/options/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OptionItem>> {
    Ok(Json(service::delete(&state.store, &id).await?))
}

/// GET /api/options/groups
pub async fn groups(State(state): State<AppState>) -> ApiResult<Json<Vec<OptionGroupSummary>>> {
    Ok(Json(service::groups(&state.store).await?))
}

/// GET /api/options/:ccode?locale=pt
pub async fn get_group(
    State(state): State<AppState>,
    Path(ccode): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Json<Vec<OptionItem>>> {
    let locale = params.resolved();
    Ok(Json(service::get_group(&state.store, &ccode, &locale).await?))
}

/// PUT /api/options/:ccode
///
/// Тело `{locale?, items: [...]}` полностью заменяет группу; `items: []` очищает её.
pub async fn replace_group(
    State(state): State<AppState>,
    Path(ccode): Path<String>,
    body: Result<Json<OptionGroupDto>, JsonRejection>,
) -> ApiResult<Json<Vec<OptionItem>>> {
    let Json(dto) = body?;
    Ok(Json(service::replace_group(&state.store, &ccode, dto).await?))
}

/// DELETE /api/options/:ccode?locale=
pub async fn delete_group(
    State(state): State<AppState>,
    Path(ccode): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Json<Vec<OptionItem>>> {
    Ok(Json(service::delete_group(&state.store, &ccode, &params).await?))
}

/// GET /api/options/:ccode/exists
pub async fn exists(
    State(state): State<AppState>,
    Path(ccode): Path<String>,
) -> ApiResult<Json<ExistsResponse>> {
    let exists = service::exists(&state.store, &ccode).await?;
    Ok(Json(ExistsResponse { exists }))
}
