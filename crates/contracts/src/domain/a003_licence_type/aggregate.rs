use serde::{Deserialize, Serialize};

use crate::domain::a001_sector::aggregate::is_blank;
use crate::domain::a002_category::aggregate::non_empty;
use crate::domain::common::EntityMetadata;

/// Тип лицензии, привязанный к категории
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenceType {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    /// Срок действия лицензии в месяцах
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity_months: Option<i32>,
    pub active: bool,
    pub sort_order: Option<i32>,
    pub metadata: EntityMetadata,
}

impl LicenceType {
    pub fn new_for_insert(dto: &LicenceTypeDto, next_order: i32) -> Self {
        Self {
            id: String::new(),
            name: dto.name.clone().unwrap_or_default(),
            code: dto.code.clone().unwrap_or_default(),
            description: dto.description.clone(),
            category_id: non_empty(&dto.category_id),
            category_name: None,
            validity_months: dto.validity_months,
            active: dto.active != Some(false),
            sort_order: Some(dto.sort_order.unwrap_or(next_order)),
            metadata: EntityMetadata::new(),
        }
    }

    pub fn update(&mut self, dto: &LicenceTypeDto) {
        if let Some(name) = &dto.name {
            self.name = name.clone();
        }
        if let Some(code) = &dto.code {
            self.code = code.clone();
        }
        if dto.description.is_some() {
            self.description = dto.description.clone();
        }
        if dto.category_id.is_some() {
            self.category_id = non_empty(&dto.category_id);
        }
        if dto.validity_months.is_some() {
            self.validity_months = dto.validity_months;
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

/// Тело запросов POST/PUT для типа лицензии
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenceTypeDto {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub validity_months: Option<i32>,
    pub active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl LicenceTypeDto {
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
