//! Приём файлов через multipart и сохранение в локальный каталог

use std::path::Path;

use axum::body::Bytes;
use axum::extract::Multipart;
use contracts::shared::api::UploadResponse;

use crate::shared::error::{ApiError, ApiResult};

/// Имя поля формы с файлом
pub const FILE_FIELD: &str = "file";

const FALLBACK_NAME: &str = "upload";

/// Файл, извлечённый из multipart-запроса
#[derive(Debug)]
pub struct IncomingFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Reads the `file` field; other fields are skipped.
pub async fn read_file_field(multipart: &mut Multipart) -> ApiResult<IncomingFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or(FALLBACK_NAME).to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read uploaded file: {}", e)))?;
        return Ok(IncomingFile { file_name, bytes });
    }
    Err(ApiError::Validation("No file uploaded".to_string()))
}

/// Replaces everything outside `[A-Za-z0-9._-]` with `_`
pub fn sanitize_file_name(name: &str) -> String {
    // браузеры на Windows присылают полный путь
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let clean: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let clean = clean.trim_matches('.');
    if clean.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        clean.to_string()
    }
}

/// `report.final.pdf` + 1700000000000 -> `report.final-1700000000000.pdf`
pub fn timestamped_name(sanitized: &str, millis: i64) -> String {
    match sanitized.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!("{}-{}.{}", stem, millis, ext)
        }
        _ => format!("{}-{}", sanitized, millis),
    }
}

/// Сохранить файл и вернуть публичный URL
pub async fn store_file(
    dir: &Path,
    public_prefix: &str,
    file: &IncomingFile,
    max_bytes: usize,
) -> ApiResult<UploadResponse> {
    if file.bytes.len() > max_bytes {
        return Err(ApiError::Validation(format!(
            "File too large: {} bytes (max {})",
            file.bytes.len(),
            max_bytes
        )));
    }

    let stored_name = timestamped_name(
        &sanitize_file_name(&file.file_name),
        chrono::Utc::now().timestamp_millis(),
    );

    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        ApiError::Upload(format!("Failed to create upload directory {}: {}", dir.display(), e))
    })?;
    let path = dir.join(&stored_name);
    tokio::fs::write(&path, &file.bytes)
        .await
        .map_err(|e| ApiError::Upload(format!("Failed to save file: {}", e)))?;

    tracing::info!(
        "Stored upload '{}' as {} ({} bytes)",
        file.file_name,
        path.display(),
        file.bytes.len()
    );
    Ok(UploadResponse {
        url: format!("{}/{}", public_prefix.trim_end_matches('/'), stored_name),
    })
}
