use serde::{Deserialize, Serialize};

use crate::geo::ViewBounds;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportResponse {
    /// Area the map should display
    pub bounds: ViewBounds,
    /// Padding in pixels applied when fitting
    #[cfg_attr(feature = "docs", schema(value_type = Vec<u32>))]
    pub padding: [u32; 2],
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfigResponse {
    /// The view cannot be moved outside of these bounds
    pub max_bounds: ViewBounds,
    /// How strictly `max_bounds` is enforced, 1.0 is solid
    pub max_bounds_viscosity: f64,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Bounds shown before the first device render
    pub initial_bounds: ViewBounds,
    /// Tile URL template
    pub tile_url: String,
    pub attribution: String,
    /// Period of the device refresh
    pub refresh_interval_ms: u64,
}
