use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    ValidateTemplateRequest, ValidateTemplateResponse, WhatsappLinkRequest, WhatsappLinkResponse,
};
use crate::services::whatsapp::{build_whatsapp_link, render_template, unknown_placeholders};

#[axum::debug_handler]
pub async fn whatsapp_link(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<WhatsappLinkRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("Whatsapp link requested by {}", user.id);

    let message = render_template(&request.template, &request.placeholders);
    let url = build_whatsapp_link(&config.whatsapp_base_url, &request.phone, &message)?;

    Ok(Json(json!(WhatsappLinkResponse { url, message })))
}

#[axum::debug_handler]
pub async fn validate_template(
    Extension(user): Extension<User>,
    Json(request): Json<ValidateTemplateRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("Template validation requested by {}", user.id);

    let unknown = unknown_placeholders(&request.template);

    Ok(Json(json!(ValidateTemplateResponse {
        valid: unknown.is_empty(),
        unknown_placeholders: unknown,
    })))
}
