use serde::{Deserialize, Serialize};

/// Тело ошибки, которое возвращают все обработчики
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Ответ на PATCH ?action=activate|deactivate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    pub message: String,
    pub id: String,
    pub active: bool,
}

/// Ответ POST /api/upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Тело POST /api/documents/batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    #[serde(default)]
    pub document_ids: Option<Vec<String>>,
}

/// Ответ GET /api/options/:ccode/exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Ответ GET /api/app-info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub app_code: String,
    pub preview_mode: bool,
    pub backend_configured: bool,
    pub version: String,
}
