use std::collections::HashMap;

use serde_json::Value;

/// Описание сущности, которой владеет внешний API
#[derive(Debug)]
pub struct ProxyResource {
    /// Человекочитаемое имя во множественном числе, для сообщений об ошибках
    pub label: &'static str,
    /// Путь во внешнем API (без ведущего слеша)
    pub upstream_path: &'static str,
    /// Поля, обязательные в теле POST
    pub required_fields: &'static [&'static str],
    /// Фильтры, которые пробрасываются в query-строку
    pub filters: &'static [&'static str],
}

const COMMON_FILTERS: &[&str] = &["search", "name", "code", "sortBy", "sortDirection"];

pub static FEE_CATEGORIES: ProxyResource = ProxyResource {
    label: "fee categories",
    upstream_path: "fee-categories",
    required_fields: &["name", "code", "amount"],
    filters: &["licenseTypeId", "currency"],
};

pub static LEGISLATIONS: ProxyResource = ProxyResource {
    label: "legislations",
    upstream_path: "legislations",
    required_fields: &["title", "number"],
    filters: &["type", "year", "title", "number"],
};

pub static LICENSE_PARAMETERS: ProxyResource = ProxyResource {
    label: "license parameters",
    upstream_path: "license-parameters",
    required_fields: &["licenseTypeId", "name"],
    filters: &["licenseTypeId", "parameterType", "isRequired"],
};

pub static PROCESS_TYPES: ProxyResource = ProxyResource {
    label: "process types",
    upstream_path: "process-types",
    required_fields: &["name", "code"],
    filters: &["category", "licenseTypeId"],
};

pub static DOCUMENTS: ProxyResource = ProxyResource {
    label: "documents",
    upstream_path: "documents",
    required_fields: &["name", "fileUrl"],
    filters: &["entityId", "ownerId", "documentType", "mimeType"],
};

pub static ENTITIES: ProxyResource = ProxyResource {
    label: "entities",
    upstream_path: "entities",
    required_fields: &["name", "nuit"],
    filters: &["entityType", "nuit", "sectorId"],
};

pub const DEFAULT_ACTIVE: &str = "true";
pub const DEFAULT_PAGE_NUMBER: usize = 0;
pub const DEFAULT_PAGE_SIZE: usize = 20;

impl ProxyResource {
    fn recognizes(&self, key: &str) -> bool {
        COMMON_FILTERS.contains(&key) || self.filters.contains(&key)
    }

    /// Query string for the upstream list call
    ///
    /// `active`, `pageNumber` (0-based) and `pageSize` are always sent. The
    /// 1-based `page`/`limit` pair used by the mock routes is accepted as an
    /// alias. Unrecognized parameters are dropped.
    pub fn build_query(&self, params: &HashMap<String, String>) -> Vec<(String, String)> {
        let param = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let active = param("active").unwrap_or(DEFAULT_ACTIVE).to_string();
        let page_number = param("pageNumber")
            .and_then(|v| v.parse::<usize>().ok())
            .or_else(|| {
                param("page")
                    .and_then(|v| v.parse::<usize>().ok())
                    .map(|p| p.saturating_sub(1))
            })
            .unwrap_or(DEFAULT_PAGE_NUMBER);
        let page_size = param("pageSize")
            .or_else(|| param("limit"))
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let mut query = vec![
            ("active".to_string(), active),
            ("pageNumber".to_string(), page_number.to_string()),
            ("pageSize".to_string(), page_size.to_string()),
        ];

        let mut keys: Vec<&String> = params.keys().filter(|k| self.recognizes(k)).collect();
        keys.sort();
        for key in keys {
            if let Some(value) = param(key) {
                query.push((key.clone(), value.to_string()));
            }
        }
        query
    }

    /// Required fields that are absent, `null` or blank in a create body
    pub fn missing_required(&self, body: &Value) -> Vec<&'static str> {
        self.required_fields
            .iter()
            .copied()
            .filter(|field| match body.get(*field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .collect()
    }

    /// Upstream path of a single record
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.upstream_path, urlencoding::encode(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn value<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
        query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn defaults_are_applied() {
        let query = FEE_CATEGORIES.build_query(&HashMap::new());
        assert_eq!(value(&query, "active"), Some("true"));
        assert_eq!(value(&query, "pageNumber"), Some("0"));
        assert_eq!(value(&query, "pageSize"), Some("20"));
        assert_eq!(query.len(), 3);
    }

    #[test]
    fn recognized_filters_pass_and_unknown_are_dropped() {
        let query = DOCUMENTS.build_query(&params(&[
            ("entityId", "42"),
            ("search", "alvará"),
            ("hack", "1"),
            ("code", ""),
            ("active", "false"),
        ]));
        assert_eq!(value(&query, "entityId"), Some("42"));
        assert_eq!(value(&query, "search"), Some("alvará"));
        assert_eq!(value(&query, "active"), Some("false"));
        assert_eq!(value(&query, "hack"), None);
        assert_eq!(value(&query, "code"), None);
        assert_eq!(query.iter().filter(|(k, _)| k == "active").count(), 1);
    }

    #[test]
    fn one_based_page_alias_is_translated() {
        let query = LEGISLATIONS.build_query(&params(&[("page", "3"), ("limit", "50")]));
        assert_eq!(value(&query, "pageNumber"), Some("2"));
        assert_eq!(value(&query, "pageSize"), Some("50"));

        let explicit = LEGISLATIONS.build_query(&params(&[("pageNumber", "1"), ("page", "9")]));
        assert_eq!(value(&explicit, "pageNumber"), Some("1"));
    }

    #[test]
    fn missing_required_checks_presence_and_blank() {
        let body = json!({"name": "Taxa de vistoria", "code": " ", "amount": 1500});
        assert_eq!(FEE_CATEGORIES.missing_required(&body), vec!["code"]);
        assert_eq!(
            FEE_CATEGORIES.missing_required(&json!({"amount": null})),
            vec!["name", "code", "amount"]
        );
    }

    #[test]
    fn item_path_encodes_id() {
        assert_eq!(DOCUMENTS.item_path("a b/c"), "documents/a%20b%2Fc");
    }
}
