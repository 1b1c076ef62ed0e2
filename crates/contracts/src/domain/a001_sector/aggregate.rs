use serde::{Deserialize, Serialize};

use crate::domain::common::EntityMetadata;

/// Сектор экономической деятельности (верхний уровень справочника лицензирования)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sector_type_key: Option<String>,
    pub sector_type_value: Option<String>,
    pub active: bool,
    pub sort_order: Option<i32>,
    pub metadata: EntityMetadata,
}

impl Sector {
    /// Создать сектор из DTO для вставки в хранилище
    ///
    /// `next_order` подставляется, если порядок в DTO не задан.
    pub fn new_for_insert(dto: &SectorDto, next_order: i32) -> Self {
        Self {
            id: String::new(),
            name: dto.name.clone().unwrap_or_default(),
            code: dto.code.clone().unwrap_or_default(),
            description: dto.description.clone(),
            sector_type_key: dto.sector_type_key.clone(),
            sector_type_value: dto.sector_type_value.clone(),
            active: dto.active != Some(false),
            sort_order: Some(dto.sort_order.unwrap_or(next_order)),
            metadata: EntityMetadata::new(),
        }
    }

    /// Обновить данные из DTO (отсутствующие поля сохраняют прежние значения)
    pub fn update(&mut self, dto: &SectorDto) {
        if let Some(name) = &dto.name {
            self.name = name.clone();
        }
        if let Some(code) = &dto.code {
            self.code = code.clone();
        }
        if dto.description.is_some() {
            self.description = dto.description.clone();
        }
        if dto.sector_type_key.is_some() {
            self.sector_type_key = dto.sector_type_key.clone();
        }
        if dto.sector_type_value.is_some() {
            self.sector_type_value = dto.sector_type_value.clone();
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

/// Тело запросов POST/PUT для сектора
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorDto {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub sector_type_key: Option<String>,
    pub sector_type_value: Option<String>,
    pub active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl SectorDto {
    /// Обязательные поля, отсутствующие (или пустые) в запросе на создание
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

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
