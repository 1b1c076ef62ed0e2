use serde::{Deserialize, Serialize};

use crate::domain::a001_sector::aggregate::is_blank;
use crate::domain::common::EntityMetadata;

/// Категория лицензируемой деятельности
///
/// Может ссылаться на родительскую категорию и на сектор. `sector_name`
/// вычисляется по `sector_id` при каждом чтении.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parent_category_id: Option<String>,
    pub sector_id: Option<String>,
    pub sector_name: Option<String>,
    pub active: bool,
    pub sort_order: Option<i32>,
    pub metadata: EntityMetadata,
}

impl Category {
    pub fn new_for_insert(dto: &CategoryDto, next_order: i32) -> Self {
        Self {
            id: String::new(),
            name: dto.name.clone().unwrap_or_default(),
            code: dto.code.clone().unwrap_or_default(),
            description: dto.description.clone(),
            parent_category_id: non_empty(&dto.parent_category_id),
            sector_id: non_empty(&dto.sector_id),
            sector_name: None,
            active: dto.active != Some(false),
            sort_order: Some(dto.sort_order.unwrap_or(next_order)),
            metadata: EntityMetadata::new(),
        }
    }

    /// Обновить данные из DTO (отсутствующие поля сохраняют прежние значения)
    ///
    /// Пустая строка в `parentCategoryId`/`sectorId` снимает ссылку.
    pub fn update(&mut self, dto: &CategoryDto) {
        if let Some(name) = &dto.name {
            self.name = name.clone();
        }
        if let Some(code) = &dto.code {
            self.code = code.clone();
        }
        if dto.description.is_some() {
            self.description = dto.description.clone();
        }
        if dto.parent_category_id.is_some() {
            self.parent_category_id = non_empty(&dto.parent_category_id);
        }
        if dto.sector_id.is_some() {
            self.sector_id = non_empty(&dto.sector_id);
        }
        if let Some(active) = dto.active {
            self.active = active;
        }
        if dto.sort_order.is_some() {
            self.sort_order = dto.sort_order;
        }
        self.metadata.touch();
    }
}

/// Тело запросов POST/PUT для категории
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub parent_category_id: Option<String>,
    pub sector_id: Option<String>,
    pub active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl CategoryDto {
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.code) {
            missing.push("code");
        }
        missing
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
