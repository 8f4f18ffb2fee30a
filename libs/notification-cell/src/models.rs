use serde::{Deserialize, Serialize};

use shared_models::error::AppError;

/// Placeholder values available to message templates. Names mirror the tokens
/// template authors write: `{patientName}`, `{nextControlDate}`, `{centerName}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateValues {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub next_control_date: String,
    #[serde(default)]
    pub center_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhatsappLinkRequest {
    pub phone: String,
    pub template: String,
    #[serde(default)]
    pub placeholders: TemplateValues,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhatsappLinkResponse {
    pub url: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateTemplateRequest {
    pub template: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateTemplateResponse {
    pub valid: bool,
    pub unknown_placeholders: Vec<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationError {
    #[error("Phone number has no usable digits: {0:?}")]
    InvalidPhone(String),
}

impl From<NotificationError> for AppError {
    fn from(err: NotificationError) -> Self {
        match &err {
            NotificationError::InvalidPhone(_) => AppError::ValidationError(err.to_string()),
        }
    }
}
