use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_size;

/// Middleware для логирования HTTP запросов
///
/// Одна строка на запрос: длительность (ms), размер ответа, статус, метод и
/// путь. Время добавляет сам tracing.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let declared = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());

    // без Content-Length читаем тело, чтобы узнать реальный размер
    let (response, size) = match declared {
        Some(size) => (response, Some(size)),
        None => {
            let (parts, body) = response.into_parts();
            match to_bytes(body, usize::MAX).await {
                Ok(bytes) => {
                    let size = bytes.len();
                    (Response::from_parts(parts, Body::from(bytes)), Some(size))
                }
                Err(_) => (Response::from_parts(parts, Body::empty()), None),
            }
        }
    };

    let status = response.status();
    let size = size.map(format_size).unwrap_or_else(|| "error".to_string());
    let elapsed = start.elapsed().as_millis();
    if status.is_server_error() {
        tracing::error!("{:>5}ms | {:>9} | {} {:>6} {}", elapsed, size, status.as_u16(), method, path);
    } else if status.is_client_error() {
        tracing::warn!("{:>5}ms | {:>9} | {} {:>6} {}", elapsed, size, status.as_u16(), method, path);
    } else {
        tracing::info!("{:>5}ms | {:>9} | {} {:>6} {}", elapsed, size, status.as_u16(), method, path);
    }
    response
}
