//! Обработчики сущностей, которыми владеет внешний API лицензирования.
//!
//! Один набор обработчиков обслуживает все ресурсы: конкретный ресурс
//! приходит в состоянии роутера ([`ProxyState`]).

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api::BatchRequest;
use serde_json::{json, Value};

use crate::shared::actions::{ActionParams, BatchAction, StatusAction};
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::state::AppState;
use crate::shared::upstream::{ProxyResource, UpstreamClient, UpstreamError, UpstreamResponse};

/// Состояние роутера одного проксируемого ресурса
#[derive(Clone)]
pub struct ProxyState {
    pub upstream: UpstreamClient,
    pub resource: &'static ProxyResource,
}

impl ProxyState {
    pub fn new(app: &AppState, resource: &'static ProxyResource) -> Self {
        Self {
            upstream: app.upstream.clone(),
            resource,
        }
    }

    async fn call(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> ApiResult<Response> {
        match self.upstream.send(method, path, query, body).await {
            Ok(response) => Ok(relay(response)),
            Err(err) => Err(upstream_failure(err, operation, self.resource.label)),
        }
    }
}

/// Upstream failure -> HTTP error with a generic message
///
/// A 4xx/5xx status from the upstream is relayed, its body is only logged.
fn upstream_failure(err: UpstreamError, operation: &str, label: &str) -> ApiError {
    match &err {
        UpstreamError::Status { body, .. } => {
            tracing::error!("Failed to {} {}: {} body={}", operation, label, err, body)
        }
        _ => tracing::error!("Failed to {} {}: {}", operation, label, err),
    }
    let message = match &err {
        UpstreamError::NotConfigured => err.to_string(),
        _ => format!("Failed to {} {}", operation, label),
    };
    ApiError::Upstream {
        status: err.status(),
        message,
    }
}

fn relay(response: UpstreamResponse) -> Response {
    if response.status == StatusCode::NO_CONTENT {
        return StatusCode::NO_CONTENT.into_response();
    }
    (response.status, Json(response.body)).into_response()
}

/// GET /api/<resource>
pub async fn list(
    State(proxy): State<ProxyState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Response> {
    let query = proxy.resource.build_query(&params);
    proxy
        .call("fetch", Method::GET, proxy.resource.upstream_path, &query, None)
        .await
}

/// GET /api/<resource>/:id
pub async fn get_by_id(
    State(proxy): State<ProxyState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    proxy
        .call("fetch", Method::GET, &proxy.resource.item_path(&id), &[], None)
        .await
}

/// POST /api/<resource>
pub async fn create(
    State(proxy): State<ProxyState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(body) = body?;
    let missing = proxy.resource.missing_required(&body);
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }
    proxy
        .call(
            "create",
            Method::POST,
            proxy.resource.upstream_path,
            &[],
            Some(&body),
        )
        .await
}

/// PUT /api/<resource>/:id
pub async fn update(
    State(proxy): State<ProxyState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(body) = body?;
    proxy
        .call(
            "update",
            Method::PUT,
            &proxy.resource.item_path(&id),
            &[],
            Some(&body),
        )
        .await
}

/// DELETE /api/<resource>/:id
pub async fn delete(
    State(proxy): State<ProxyState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    proxy
        .call("delete", Method::DELETE, &proxy.resource.item_path(&id), &[], None)
        .await
}

/// PATCH /api/<resource>/:id?action=activate|deactivate
pub async fn set_status(
    State(proxy): State<ProxyState>,
    Path(id): Path<String>,
    Query(params): Query<ActionParams>,
) -> ApiResult<Response> {
    let action = StatusAction::parse(params.action.as_deref())?;
    let query = [("action".to_string(), action.code().to_string())];
    proxy
        .call(
            action.code(),
            Method::PATCH,
            &proxy.resource.item_path(&id),
            &query,
            None,
        )
        .await
}

/// POST /api/documents/batch?action=activate|deactivate|delete
pub async fn batch(
    State(proxy): State<ProxyState>,
    Query(params): Query<ActionParams>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let action = BatchAction::parse(params.action.as_deref())?;
    let Json(request) = body?;
    let ids: Vec<String> = request
        .document_ids
        .unwrap_or_default()
        .into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    if ids.is_empty() {
        return Err(ApiError::Validation(
            "documentIds must be a non-empty array".to_string(),
        ));
    }
    tracing::info!("Batch {} of {} documents", action.code(), ids.len());

    let query = [("action".to_string(), action.code().to_string())];
    let body = json!({ "documentIds": ids });
    proxy
        .call(
            &format!("{} batch of", action.code()),
            Method::POST,
            &format!("{}/batch", proxy.resource.upstream_path),
            &query,
            Some(&body),
        )
        .await
}
