use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use devmap_api::models::{RefreshOutcome, RefreshStatusResponse};

use crate::services::RefreshService;

#[derive(Clone)]
pub struct RefreshState {
    pub refresh_service: Arc<RefreshService>,
}

pub fn refresh_router(refresh_state: RefreshState) -> Router {
    Router::new()
        .route("/api/refresh", post(trigger_refresh))
        .route("/api/refresh/status", get(get_refresh_status))
        .with_state(refresh_state)
}

#[utoipa::path(
    post,
    path = "/api/refresh",
    tag = "refresh",
    responses(
        (status = 200, description = "Outcome of the manual refresh", body = RefreshOutcome)
    )
)]
pub async fn trigger_refresh(State(state): State<RefreshState>) -> Json<RefreshOutcome> {
    tracing::debug!("manual refresh requested");

    Json(state.refresh_service.refresh().await)
}

#[utoipa::path(
    get,
    path = "/api/refresh/status",
    tag = "refresh",
    responses(
        (status = 200, description = "State of the refresh loop", body = RefreshStatusResponse)
    )
)]
pub async fn get_refresh_status(State(state): State<RefreshState>) -> Json<RefreshStatusResponse> {
    Json(state.refresh_service.status().await)
}
