use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a005_general_data::aggregate::{GeneralDataRecord, GeneralDataDto};
use contracts::shared::api::StatusMessage;
use contracts::shared::list::ListResponse;

use crate::domain::a005_general_data::service::{self, GeneralDataFilter};
use crate::shared::actions::{ActionParams, StatusAction};
use crate::shared::error::ApiResult;
use crate::shared::state::AppState;

/// GET /api/dossier/general
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<GeneralDataFilter>,
) -> ApiResult<Json<ListResponse<GeneralDataRecord>>> {
    Ok(Json(service::list(&state.store, &filter).await?))
}

/// GET /api/dossier/general/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<GeneralDataRecord>> {
    Ok(Json(service::get_by_id(&state.store, &id).await?))
}

/// POST /api/dossier/general
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<GeneralDataDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GeneralDataRecord>)> {
    let Json(dto) = body?;
    let record = service::create(&state.store, dto).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/dossier/general/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<GeneralDataDto>, JsonRejection>,
) -> ApiResult<Json<GeneralDataRecord>> {
    let Json(dto) = body?;
    Ok(Json(service::update(&state.store, &id, dto).await?))
}

/// DELETE /api/dossier/general/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<GeneralDataRecord>> {
    Ok(Json(service::delete(&state.store, &id).await?))
}

/// PATCH /api/dossier/general/:id?action=activate|deactivate
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ActionParams>,
) -> ApiResult<Json<StatusMessage>> {
    let action = StatusAction::parse(params.action.as_deref())?;
    let record = service::set_active(&state.store, &id, action).await?;
    Ok(Json(StatusMessage {
        message: format!("General data parameter {} successfully", action.past_tense()),
        id: record.id,
        active: record.active,
    }))
}
