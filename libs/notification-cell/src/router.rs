use std::sync::Arc;

use axum::{middleware, routing::post, Router};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn notification_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/whatsapp-link", post(whatsapp_link))
        .route("/templates/validate", post(validate_template))
        .layer(middleware::from_fn_with_state(config.clone(), auth_middleware))
        .with_state(config)
}
