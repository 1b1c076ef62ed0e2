use serde::{Deserialize, Serialize};

use crate::domain::a001_sector::aggregate::is_blank;
use crate::domain::common::EntityMetadata;

/// Локаль по умолчанию для справочных опций
pub const DEFAULT_LOCALE: &str = "pt";

/// Элемент справочника опций (lookup)
///
/// Опции группируются по паре `(ccode, locale)`. Поля в snake_case, как в
/// исходном формате обмена.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub ccode: String,
    pub ckey: String,
    pub cvalue: String,
    pub locale: String,
    pub sort_order: Option<i32>,
    pub active: bool,
    pub description: Option<String>,
    pub metadata: EntityMetadata,
}

impl OptionItem {
    pub fn new_for_insert(dto: &OptionDto, next_order: i32) -> Self {
        Self {
            id: String::new(),
            ccode: dto.ccode.clone().unwrap_or_default(),
            ckey: dto.ckey.clone().unwrap_or_default(),
            cvalue: dto.cvalue.clone().unwrap_or_default(),
            locale: dto
                .locale
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            sort_order: Some(dto.sort_order.unwrap_or(next_order)),
            active: dto.active != Some(false),
            description: dto.description.clone(),
            metadata: EntityMetadata::new(),
        }
    }

    /// Элемент группы, записываемый через PUT /api/options/:ccode
    pub fn from_group_item(ccode: &str, locale: &str, item: &OptionGroupItem, position: usize) -> Self {
        Self {
            id: String::new(),
            ccode: ccode.to_string(),
            ckey: item.ckey.clone(),
            cvalue: item.cvalue.clone(),
            locale: locale.to_string(),
            sort_order: Some(item.sort_order.unwrap_or(position as i32 + 1)),
            active: item.active != Some(false),
            description: item.description.clone(),
            metadata: EntityMetadata::new(),
        }
    }

    pub fn update(&mut self, dto: &OptionDto) {
        if let Some(ccode) = &dto.ccode {
            self.ccode = ccode.clone();
        }
        if let Some(ckey) = &dto.ckey {
            self.ckey = ckey.clone();
        }
        if let Some(cvalue) = &dto.cvalue {
            self.cvalue = cvalue.clone();
        }
        if let Some(locale) = &dto.locale {
            self.locale = locale.clone();
        }
        if dto.sort_order.is_some() {
            self.sort_order = dto.sort_order;
        }
        if let Some(active) = dto.active {
            self.active = active;
        }
        if dto.description.is_some() {
            self.description = dto.description.clone();
        }
        self.metadata.touch();
    }
}

/// Тело запросов POST/PUT для отдельной опции
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionDto {
    pub ccode: Option<String>,
    pub ckey: Option<String>,
    pub cvalue: Option<String>,
    pub locale: Option<String>,
    pub sort_order: Option<i32>,
    pub active: Option<bool>,
    pub description: Option<String>,
}

impl OptionDto {
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.ccode) {
            missing.push("ccode");
        }
        if is_blank(&self.ckey) {
            missing.push("ckey");
        }
        if is_blank(&self.cvalue) {
            missing.push("cvalue");
        }
        missing
    }
}

/// Элемент в теле PUT /api/options/:ccode
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionGroupItem {
    pub ckey: String,
    pub cvalue: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Тело PUT /api/options/:ccode: полная замена группы `(ccode, locale)`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionGroupDto {
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub items: Vec<OptionGroupItem>,
}

/// Сводка по группе опций для GET /api/options/groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionGroupSummary {
    pub ccode: String,
    pub locales: Vec<String>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_locale_falls_back_to_default() {
        let dto = OptionDto {
            ccode: Some("PAYMENT_METHOD".into()),
            ckey: Some("CASH".into()),
            cvalue: Some("Numerário".into()),
            locale: Some(" ".into()),
            ..Default::default()
        };
        let item = OptionItem::new_for_insert(&dto, 4);
        assert_eq!(item.locale, DEFAULT_LOCALE);
        assert_eq!(item.sort_order, Some(4));
        assert!(item.active);
    }

    #[test]
    fn group_body_tolerates_missing_items() {
        let dto: OptionGroupDto = serde_json::from_str(r#"{"locale":"en"}"#).unwrap();
        assert!(dto.items.is_empty());
        assert_eq!(dto.locale.as_deref(), Some("en"));
    }

    #[test]
    fn group_item_position_drives_default_order() {
        let item = OptionGroupItem {
            ckey: "A".into(),
            cvalue: "Alpha".into(),
            ..Default::default()
        };
        let option = OptionItem::from_group_item("LETTERS", "en", &item, 2);
        assert_eq!(option.sort_order, Some(3));
        assert_eq!(option.ccode, "LETTERS");
    }
}
