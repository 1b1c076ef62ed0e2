use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api::ErrorBody;
use thiserror::Error;

/// Ошибки HTTP-слоя
///
/// Каждый обработчик возвращает `Result<_, ApiError>`, поэтому любая ошибка
/// превращается в JSON `{"error": "..."}` с соответствующим статусом.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Отсутствуют или некорректны обязательные поля / параметры
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Ошибка внешнего API; статус берётся из ответа, если он был
    #[error("{message}")]
    Upstream {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("{0}")]
    Upload(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Ошибка валидации с перечислением отсутствующих полей
    pub fn missing_fields(fields: &[&str]) -> Self {
        ApiError::Validation(format!("Missing required fields: {}", fields.join(", ")))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => status
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{} -> {}", status.as_u16(), self);
        } else {
            tracing::warn!("{} -> {}", status.as_u16(), self);
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

/// Некорректное JSON-тело запроса -> 400 с JSON-ошибкой вместо текстового ответа axum
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_names_fields() {
        let err = ApiError::missing_fields(&["name", "code"]);
        assert_eq!(err.to_string(), "Missing required fields: name, code");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_relays_error_status_or_falls_back_to_500() {
        let relayed = ApiError::Upstream {
            status: Some(StatusCode::CONFLICT),
            message: "Failed".into(),
        };
        assert_eq!(relayed.status(), StatusCode::CONFLICT);

        let unknown = ApiError::Upstream {
            status: None,
            message: "Failed".into(),
        };
        assert_eq!(unknown.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // 2xx is never reported as an error status
        let odd = ApiError::Upstream {
            status: Some(StatusCode::OK),
            message: "Failed".into(),
        };
        assert_eq!(odd.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            ApiError::NotFound("Sector not found".into()).status(),
            StatusCode::NOT_FOUND
        );
    }
}
