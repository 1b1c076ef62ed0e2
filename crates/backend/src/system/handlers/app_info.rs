use axum::extract::State;
use axum::Json;
use contracts::shared::api::AppInfo;

use crate::shared::state::AppState;

/// GET /api/app-info
///
/// `previewMode` только сообщается клиенту, на поведение сервера он не влияет.
pub async fn app_info(State(state): State<AppState>) -> Json<AppInfo> {
    Json(AppInfo {
        app_code: state.config.app_code().to_string(),
        preview_mode: state.config.app.preview_mode,
        backend_configured: state.upstream.is_configured(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
