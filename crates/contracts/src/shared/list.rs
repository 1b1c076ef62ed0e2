use serde::{Deserialize, Serialize};

/// Ответ списочных эндпоинтов
///
/// Поля пагинации присутствуют только если клиент запросил страницу.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub content: Vec<T>,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
}

impl<T> ListResponse<T> {
    /// Полный список без пагинации
    pub fn unpaged(content: Vec<T>) -> Self {
        let total = content.len();
        Self {
            content,
            total,
            page: None,
            limit: None,
            total_pages: None,
        }
    }
}
