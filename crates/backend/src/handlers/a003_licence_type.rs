use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_licence_type::aggregate::{LicenceType, LicenceTypeDto};
use contracts::shared::api::StatusMessage;
use contracts::shared::list::ListResponse;

use crate::domain::a003_licence_type::service::{self, LicenceTypeFilter};
use crate::shared::actions::{ActionParams, StatusAction};
use crate::shared::error::ApiResult;
use crate::shared::state::AppState;

/// GET /api/licence-types
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<LicenceTypeFilter>,
) -> ApiResult<Json<ListResponse<LicenceType>>> {
    Ok(Json(service::list(&state.store, &filter).await?))
}

/// GET /api/licence-types/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<LicenceType>> {
    Ok(Json(service::get_by_id(&state.store, &id).await?))
}

/// POST /api/licence-types
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<LicenceTypeDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<LicenceType>)> {
    let Json(dto) = body?;
    let licence = service::create(&state.store, dto).await?;
    Ok((StatusCode::CREATED, Json(licence)))
}

/// PUT /api/licence-types/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<LicenceTypeDto>, JsonRejection>,
) -> ApiResult<Json<LicenceType>> {
    let Json(dto) = body?;
    Ok(Json(service::update(&state.store, &id, dto).await?))
}

/// DELETE /api/licence-types/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<LicenceType>> {
    Ok(Json(service::delete(&state.store, &id).await?))
}

/// PATCH /api/licence-types/:id?action=activate|deactivate
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ActionParams>,
) -> ApiResult<Json<StatusMessage>> {
    let action = StatusAction::parse(params.action.as_deref())?;
    let licence = service::set_active(&state.store, &id, action).await?;
    Ok(Json(StatusMessage {
        message: format!("Licence type {} successfully", action.past_tense()),
        id: licence.id,
        active: licence.active,
    }))
}
