use axum::routing::get;
use axum::{Json, Router};
use devmap_api::geo::{LatLng, ViewBounds};
use devmap_api::models::*;
use utoipa::OpenApi;

use super::map_handle::*;
use super::refresh_handle::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        get_map_config,
        get_viewport,
        get_markers,
        get_marker_by_id,
        trigger_refresh,
        get_refresh_status,
    ),
    components(schemas(
        LatLng,
        ViewBounds,
        DeviceRecord,
        EquipmentKind,
        DeviceStatus,
        MarkerIcon,
        MapMarker,
        MarkerSetResponse,
        ViewportResponse,
        MapConfigResponse,
        RefreshOutcome,
        RefreshStatusResponse,
    )),
    tags(
        (name = "map", description = "Device markers and map view"),
        (name = "refresh", description = "Device refresh loop")
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    Router::new().route("/api/openapi.json", get(get_openapi))
}

pub async fn get_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
