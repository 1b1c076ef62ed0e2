use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use contracts::shared::api::UploadResponse;

use crate::shared::error::ApiResult;
use crate::shared::state::AppState;
use crate::shared::upload;

/// POST /api/upload (multipart, поле `file`)
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart = multipart?;
    let file = upload::read_file_field(&mut multipart).await?;
    let response = upload::store_file(
        &state.upload_dir,
        &state.config.upload.public_prefix,
        &file,
        state.config.upload.max_bytes,
    )
    .await?;
    Ok(Json(response))
}
