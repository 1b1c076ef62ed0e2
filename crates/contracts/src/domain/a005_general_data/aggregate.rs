use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::a001_sector::aggregate::is_blank;
use crate::domain::a002_category::aggregate::non_empty;
use crate::domain::common::EntityMetadata;
pub use crate::enums::parameter_type::ParameterType;

/// Параметр общих данных досье для типа лицензии
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralDataRecord {
    pub id: String,
    pub license_type_id: String,
    pub license_type_name: Option<String>,
    pub parameter_name: String,
    pub parameter_value: Option<String>,
    pub parameter_type: ParameterType,
    pub is_required: bool,
    pub is_editable: bool,
    pub display_order: Option<i32>,
    /// Правила валидации в свободной форме (JSON), интерпретируются на клиенте
    pub validation_rules: Option<Value>,
    pub category: Option<String>,
    pub active: bool,
    pub metadata: EntityMetadata,
}

impl GeneralDataRecord {
    pub fn new_for_insert(dto: &GeneralDataDto, next_order: i32) -> Self {
        Self {
            id: String::new(),
            license_type_id: dto.license_type_id.clone().unwrap_or_default(),
            license_type_name: None,
            parameter_name: dto.parameter_name.clone().unwrap_or_default(),
            parameter_value: dto.parameter_value.clone(),
            parameter_type: dto.parameter_type.unwrap_or_default(),
            is_required: dto.is_required.unwrap_or(false),
            is_editable: dto.is_editable.unwrap_or(true),
            display_order: Some(dto.display_order.unwrap_or(next_order)),
            validation_rules: dto.validation_rules.clone(),
            category: non_empty(&dto.category),
            active: dto.active != Some(false),
            metadata: EntityMetadata::new(),
        }
    }

    pub fn update(&mut self, dto: &GeneralDataDto) {
        if let Some(license_type_id) = &dto.license_type_id {
            self.license_type_id = license_type_id.clone();
        }
        if let Some(name) = &dto.parameter_name {
            self.parameter_name = name.clone();
        }
        if dto.parameter_value.is_some() {
            self.parameter_value = dto.parameter_value.clone();
        }
        if let Some(parameter_type) = dto.parameter_type {
            self.parameter_type = parameter_type;
        }
        if let Some(is_required) = dto.is_required {
            self.is_required = is_required;
        }
        if let Some(is_editable) = dto.is_editable {
            self.is_editable = is_editable;
        }
        if dto.display_order.is_some() {
            self.display_order = dto.display_order;
        }
        if dto.validation_rules.is_some() {
            self.validation_rules = dto.validation_rules.clone();
        }
        if dto.category.is_some() {
            self.category = non_empty(&dto.category);
        }
        if let Some(active) = dto.active {
            self.active = active;
        }
        self.metadata.touch();
    }
}

/// Тело запросов POST/PUT для параметра досье
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralDataDto {
    pub license_type_id: Option<String>,
    pub parameter_name: Option<String>,
    pub parameter_value: Option<String>,
    pub parameter_type: Option<ParameterType>,
    pub is_required: Option<bool>,
    pub is_editable: Option<bool>,
    pub display_order: Option<i32>,
    pub validation_rules: Option<Value>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

impl GeneralDataDto {
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.license_type_id) {
            missing.push("licenseTypeId");
        }
        if is_blank(&self.parameter_name) {
            missing.push("parameterName");
        }
        missing
    }
}
