use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use devmap_api::models::{MapConfigResponse, MapMarker, MarkerSetResponse, ViewportResponse};
use tokio::sync::RwLock;

use crate::errors::ApiError;
use crate::services::MarkerLayer;

#[derive(Clone)]
pub struct MapState {
    pub layer: Arc<RwLock<MarkerLayer>>,
    pub map_config: Arc<MapConfigResponse>,
}

pub fn map_router(map_state: MapState) -> Router {
    Router::new()
        .route("/api/map", get(get_map_config))
        .route("/api/view", get(get_viewport))
        .route("/api/markers", get(get_markers))
        .route("/api/markers/:device_id", get(get_marker_by_id))
        .with_state(map_state)
}

#[utoipa::path(
    get,
    path = "/api/map",
    tag = "map",
    responses(
        (status = 200, description = "Static map configuration", body = MapConfigResponse)
    )
)]
pub async fn get_map_config(State(state): State<MapState>) -> Json<MapConfigResponse> {
    Json(state.map_config.as_ref().clone())
}

#[utoipa::path(
    get,
    path = "/api/view",
    tag = "map",
    responses(
        (status = 200, description = "Bounds fitted to the current markers", body = ViewportResponse),
        (status = 503, description = "Marker layer disposed")
    )
)]
pub async fn get_viewport(
    State(state): State<MapState>,
) -> Result<Json<ViewportResponse>, ApiError> {
    let viewport = state.layer.read().await.viewport()?;

    Ok(Json(viewport))
}

#[utoipa::path(
    get,
    path = "/api/markers",
    tag = "map",
    responses(
        (status = 200, description = "Markers of the latest render", body = MarkerSetResponse),
        (status = 503, description = "Marker layer disposed")
    )
)]
pub async fn get_markers(
    State(state): State<MapState>,
) -> Result<Json<MarkerSetResponse>, ApiError> {
    let markers = state.layer.read().await.snapshot()?;

    Ok(Json(markers))
}

#[utoipa::path(
    get,
    path = "/api/markers/{device_id}",
    tag = "map",
    params(
        ("device_id" = String, Path, description = "Device EUI")
    ),
    responses(
        (status = 200, description = "Marker of the device", body = MapMarker),
        (status = 404, description = "Device not on the map"),
        (status = 503, description = "Marker layer disposed")
    )
)]
pub async fn get_marker_by_id(
    State(state): State<MapState>,
    Path(device_id): Path<String>,
) -> Result<Json<MapMarker>, ApiError> {
    let layer = state.layer.read().await;
    let marker = layer.find(&device_id)?.clone();

    Ok(Json(marker))
}
