use std::sync::Arc;

use axum::{routing::get, Router};

use agenda_cell::router::agenda_routes;
use notification_cell::router::notification_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "ClaveSalud agenda API is running!" }))
        .nest("/agenda", agenda_routes(state.clone()))
        .nest("/notifications", notification_routes(state.clone()))
}
