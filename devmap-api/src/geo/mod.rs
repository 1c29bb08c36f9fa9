mod wkt;

pub use wkt::*;

use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

/// Rectangular area described by its south-west and north-east corners.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBounds {
    /// Lowest latitude and longitude
    pub south_west: LatLng,
    /// Highest latitude and longitude
    pub north_east: LatLng,
}

impl ViewBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self { south_west, north_east }
    }

    /// Degenerate bounds containing a single point.
    pub fn from_point(point: LatLng) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Grows the bounds so that `point` lies inside.
    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Smallest bounds enclosing every point, `None` when there are none.
    pub fn enclosing<I: IntoIterator<Item = LatLng>>(points: I) -> Option<Self> {
        points.into_iter().fold(None, |bounds, point| match bounds {
            Some(mut bounds) => {
                bounds.extend(point);
                Some(bounds)
            }
            None => Some(Self::from_point(point)),
        })
    }

    /// Corners are ordered and finite.
    pub fn is_valid(&self) -> bool {
        [self.south_west, self.north_east]
            .iter()
            .all(|p| p.lat.is_finite() && p.lng.is_finite())
            && self.south_west.lat <= self.north_east.lat
            && self.south_west.lng <= self.north_east.lng
    }
}
