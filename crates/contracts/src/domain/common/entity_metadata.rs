use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Метаданные записи справочника (lifecycle tracking)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    pub updated_at: DateTime<Utc>,
    /// Автор записи, если известен
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl EntityMetadata {
    /// Создать новые метаданные для новой записи
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Метаданные с фиксированным временем (seed-данные)
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            created_at: timestamp,
            updated_at: timestamp,
            created_by: None,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
