use axum::http::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::shared::config::UpstreamConfig;

/// Ошибки обращения к внешнему API лицензирования
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Backend URL not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Transport(String),

    /// Внешний API ответил статусом вне диапазона 2xx
    #[error("Upstream responded with status {status}")]
    Status { status: StatusCode, body: Value },

    #[error("Failed to parse upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Успешный ответ внешнего API: статус и JSON-тело как есть
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// HTTP-клиент внешнего API лицензирования
///
/// Без повторов, кэша и circuit breaker: каждый запрос независим.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: Option<String>,
    app_code: Option<String>,
    api_token: Option<String>,
}

impl UpstreamClient {
    pub fn from_config(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            client,
            base_url: config
                .base_url
                .as_deref()
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),
            app_code: config.app_code.clone().filter(|c| !c.trim().is_empty()),
            api_token: config.api_token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn url(&self, path: &str) -> Result<String, UpstreamError> {
        let base = self.base_url.as_deref().ok_or(UpstreamError::NotConfigured)?;
        Ok(format!("{}/{}", base, path.trim_start_matches('/')))
    }

    /// Отправить запрос и разобрать JSON-ответ
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.url(path)?;
        tracing::debug!("Upstream {} {} query={:?}", method, url, query);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(code) = &self.app_code {
            request = request.header("X-App-Code", code);
        }
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(format!("{} {}: {}", method, url, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let body = parse_body(&text);

        if !status.is_success() {
            let preview: String = text.chars().take(500).collect();
            tracing::error!("Upstream {} {} failed with {}: {}", method, url, status, preview);
            return Err(UpstreamError::Status {
                status,
                body: body.unwrap_or(Value::String(text)),
            });
        }

        let body = body.map_err(|e| {
            tracing::error!("Upstream {} {} returned invalid JSON: {}", method, url, e);
            UpstreamError::Decode(e.to_string())
        })?;
        Ok(UpstreamResponse { status, body })
    }
}

/// Empty bodies (204, some DELETEs) become `null`
fn parse_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
}
