use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{DeviceRecord, EquipmentKind};
use crate::geo::LatLng;

/// Communication freshness of a device.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    /// Last communication could not be read
    Unknown,
    /// Silent for longer than the stale threshold
    Stale,
    /// Silent for longer than the warning threshold
    Warning,
    /// Recently seen
    Healthy,
}

impl DeviceStatus {
    pub fn color(&self) -> &'static str {
        match self {
            DeviceStatus::Unknown => "gray",
            DeviceStatus::Stale => "#90152bff",
            DeviceStatus::Warning => "#ff8719",
            DeviceStatus::Healthy => "#459329ff",
        }
    }
}

/// Font glyph based marker, ready to feed a `divIcon` style renderer.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub kind: EquipmentKind,
    /// Glyph class, e.g. `fa-tower-broadcast`
    pub glyph: String,
    /// CSS color the glyph is tinted with
    pub color: String,
    /// Wrapper element class
    pub class_name: String,
    #[cfg_attr(feature = "docs", schema(value_type = Vec<i32>))]
    pub size: [i32; 2],
    #[cfg_attr(feature = "docs", schema(value_type = Vec<i32>))]
    pub anchor: [i32; 2],
    #[cfg_attr(feature = "docs", schema(value_type = Vec<i32>))]
    pub popup_anchor: [i32; 2],
    /// Inner markup of the icon
    pub html: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    /// Device EUI when the upstream provided one
    pub id: Option<String>,
    pub position: LatLng,
    pub status: DeviceStatus,
    pub icon: MarkerIcon,
    /// Escaped popup markup
    pub popup: String,
    pub device: DeviceRecord,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerSetResponse {
    /// Number of renders applied since startup
    pub generation: u64,
    /// Time of the render the markers come from
    #[serde(with = "time::serde::rfc3339::option")]
    pub refreshed_at: Option<OffsetDateTime>,
    pub markers: Vec<MapMarker>,
}
