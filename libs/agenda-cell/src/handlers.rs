// libs/agenda-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{CalendarQuery, DayQuery, ToggleSlotRequest};
use crate::services::AgendaService;

#[axum::debug_handler]
pub async fn day_view(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(professional_id): Path<String>,
    Query(query): Query<DayQuery>,
) -> Result<Json<Value>, AppError> {
    debug!(
        "Day view requested by {} for professional {} on {}",
        user.id, professional_id, query.date
    );

    let service = AgendaService::new(&config);
    let view = service
        .day_view(&query.center_id, &professional_id, query.date, auth.token())
        .await?;

    Ok(Json(json!(view)))
}

#[axum::debug_handler]
pub async fn toggle_slot(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(professional_id): Path<String>,
    Json(request): Json<ToggleSlotRequest>,
) -> Result<Json<Value>, AppError> {
    debug!(
        "Toggle requested by {} for professional {} at {} {}",
        user.id, professional_id, request.date, request.time
    );

    let service = AgendaService::new(&config);
    let outcome = service
        .toggle_slot(&professional_id, request, auth.token())
        .await?;

    Ok(Json(json!(outcome)))
}

#[axum::debug_handler]
pub async fn calendar_view(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(professional_id): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Value>, AppError> {
    debug!(
        "Calendar view requested by {} for professional {} ({}-{})",
        user.id, professional_id, query.year, query.month
    );

    let service = AgendaService::new(&config);
    let view = service
        .month_view(
            &query.center_id,
            &professional_id,
            query.year,
            query.month,
            auth.token(),
        )
        .await?;

    Ok(Json(json!(view)))
}
