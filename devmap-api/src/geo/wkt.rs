use std::sync::LazyLock;

use regex::Regex;

use super::LatLng;

static POINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"POINT\s*\(\s*([+-]?(?:\d+\.?\d*|\.\d+))\s+([+-]?(?:\d+\.?\d*|\.\d+))\s*\)")
        .expect("point pattern is valid")
});

/// Extracts the coordinate pair of a WKT `POINT(lat lon)`.
///
/// The numbers are returned in the order they appear. Values are not checked
/// against latitude or longitude ranges.
pub fn extract_lat_lng(wkt: &str) -> Option<LatLng> {
    let captures = POINT_PATTERN.captures(wkt)?;

    let lat = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let lng = captures.get(2)?.as_str().parse::<f64>().ok()?;

    Some(LatLng { lat, lng })
}
