use serde::{Deserialize, Serialize};

/// Тип значения параметра досье
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterType {
    #[default]
    String,
    Number,
    Boolean,
    Date,
    Json,
}

impl ParameterType {
    /// Код типа, как он приходит в query-параметрах
    pub fn code(&self) -> &'static str {
        match self {
            ParameterType::String => "STRING",
            ParameterType::Number => "NUMBER",
            ParameterType::Boolean => "BOOLEAN",
            ParameterType::Date => "DATE",
            ParameterType::Json => "JSON",
        }
    }

    pub fn all() -> Vec<ParameterType> {
        vec![
            ParameterType::String,
            ParameterType::Number,
            ParameterType::Boolean,
            ParameterType::Date,
            ParameterType::Json,
        ]
    }

    /// Парсинг из строки (регистр не важен)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "STRING" => Some(ParameterType::String),
            "NUMBER" => Some(ParameterType::Number),
            "BOOLEAN" => Some(ParameterType::Boolean),
            "DATE" => Some(ParameterType::Date),
            "JSON" => Some(ParameterType::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_code() {
        for t in ParameterType::all() {
            assert_eq!(ParameterType::from_code(t.code()), Some(t));
        }
        assert_eq!(ParameterType::from_code("number"), Some(ParameterType::Number));
        assert_eq!(ParameterType::from_code("XML"), None);
    }

    #[test]
    fn serde_uses_upper_case_codes() {
        let json = serde_json::to_string(&ParameterType::Boolean).unwrap();
        assert_eq!(json, "\"BOOLEAN\"");
        let parsed: ParameterType = serde_json::from_str("\"JSON\"").unwrap();
        assert_eq!(parsed, ParameterType::Json);
    }
}
