use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_sector::aggregate::{Sector, SectorDto};
use contracts::shared::api::StatusMessage;
use contracts::shared::list::ListResponse;

use crate::domain::a001_sector::service::{self, SectorFilter};
use crate::shared::actions::{ActionParams, StatusAction};
use crate::shared::error::ApiResult;
use crate::shared::state::AppState;

/// GET /api/sectors
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<SectorFilter>,
) -> ApiResult<Json<ListResponse<Sector>>> {
    Ok(Json(service::list(&state.store, &filter).await?))
}

/// GET /api/sectors/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Sector>> {
    Ok(Json(service::get_by_id(&state.store, &id).await?))
}

/// POST /api/sectors
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<SectorDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Sector>)> {
    let Json(dto) = body?;
    let sector = service::create(&state.store, dto).await?;
    Ok((StatusCode::CREATED, Json(sector)))
}

/// PUT /api/sectors/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<SectorDto>, JsonRejection>,
) -> ApiResult<Json<Sector>> {
    let Json(dto) = body?;
    Ok(Json(service::update(&state.store, &id, dto).await?))
}

/// DELETE /api/sectors/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Sector>> {
    Ok(Json(service::delete(&state.store, &id).await?))
}

/// PATCH /api/sectors/:id?action=activate|deactivate
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ActionParams>,
) -> ApiResult<Json<StatusMessage>> {
    let action = StatusAction::parse(params.action.as_deref())?;
    let sector = service::set_active(&state.store, &id, action).await?;
    Ok(Json(StatusMessage {
        message: format!("Sector {} successfully", action.past_tense()),
        id: sector.id,
        active: sector.active,
    }))
}
