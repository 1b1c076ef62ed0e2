use serde::Deserialize;

use crate::shared::error::{ApiError, ApiResult};

/// Query-параметр `?action=` для PATCH /api/<entity>/:id
#[derive(Debug, Deserialize, Default)]
pub struct ActionParams {
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Activate,
    Deactivate,
}

impl StatusAction {
    pub fn parse(raw: Option<&str>) -> ApiResult<Self> {
        match raw.map(str::trim) {
            Some("activate") => Ok(StatusAction::Activate),
            Some("deactivate") => Ok(StatusAction::Deactivate),
            _ => Err(ApiError::Validation(
                "Invalid action. Use 'activate' or 'deactivate'".to_string(),
            )),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StatusAction::Activate => "activate",
            StatusAction::Deactivate => "deactivate",
        }
    }

    pub fn target_active(&self) -> bool {
        matches!(self, StatusAction::Activate)
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            StatusAction::Activate => "activated",
            StatusAction::Deactivate => "deactivated",
        }
    }
}

/// Действие пакетной обработки документов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    Activate,
    Deactivate,
    Delete,
}

impl BatchAction {
    pub fn parse(raw: Option<&str>) -> ApiResult<Self> {
        match raw.map(str::trim) {
            Some("activate") => Ok(BatchAction::Activate),
            Some("deactivate") => Ok(BatchAction::Deactivate),
            Some("delete") => Ok(BatchAction::Delete),
            _ => Err(ApiError::Validation(
                "Invalid action. Use 'activate', 'deactivate' or 'delete'".to_string(),
            )),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BatchAction::Activate => "activate",
            BatchAction::Deactivate => "deactivate",
            BatchAction::Delete => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_action_parsing() {
        assert_eq!(StatusAction::parse(Some("activate")).unwrap(), StatusAction::Activate);
        assert!(!StatusAction::parse(Some("deactivate")).unwrap().target_active());
        assert!(StatusAction::parse(Some("delete")).is_err());
        assert!(StatusAction::parse(None).is_err());
    }

    #[test]
    fn batch_action_parsing() {
        assert_eq!(BatchAction::parse(Some("delete")).unwrap(), BatchAction::Delete);
        assert!(BatchAction::parse(Some("archive")).is_err());
    }
}
