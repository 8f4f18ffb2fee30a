use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn agenda_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/{professional_id}/day", get(day_view))
        .route("/{professional_id}/toggle", post(toggle_slot))
        .route("/{professional_id}/calendar", get(calendar_view))
        .layer(middleware::from_fn_with_state(config.clone(), auth_middleware))
        .with_state(config)
}
