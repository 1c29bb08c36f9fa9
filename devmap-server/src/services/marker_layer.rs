use devmap_api::geo::ViewBounds;
use devmap_api::models::{MapMarker, MarkerSetResponse, ViewportResponse};
use time::OffsetDateTime;

use crate::errors::MapError;

/// Markers currently on the map together with the view fitted to them.
///
/// The layer is mounted when the app starts and disposed on shutdown. After
/// disposal it refuses further renders and reads.
#[derive(Debug)]
pub struct MarkerLayer {
    markers: Vec<MapMarker>,
    viewport: ViewportResponse,
    generation: u64,
    refreshed_at: Option<OffsetDateTime>,
    disposed: bool,
}

impl MarkerLayer {
    pub fn mount(initial_bounds: ViewBounds, padding: [u32; 2]) -> Self {
        Self {
            markers: Vec::new(),
            viewport: ViewportResponse {
                bounds: initial_bounds,
                padding,
            },
            generation: 0,
            refreshed_at: None,
            disposed: false,
        }
    }

    /// Replaces every marker at once. The view is fitted to the new markers
    /// and stays where it was when there are none.
    pub fn replace(&mut self, markers: Vec<MapMarker>, at: OffsetDateTime) -> Result<(), MapError> {
        if self.disposed {
            return Err(MapError::LayerDisposed);
        }

        if let Some(bounds) = ViewBounds::enclosing(markers.iter().map(|m| m.position)) {
            self.viewport.bounds = bounds;
        }

        self.markers = markers;
        self.generation += 1;
        self.refreshed_at = Some(at);

        Ok(())
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn find(&self, id: &str) -> Result<&MapMarker, MapError> {
        self.check_mounted()?;

        self.markers
            .iter()
            .find(|marker| marker.id.as_deref() == Some(id))
            .ok_or(MapError::MarkerNotFound)
    }

    pub fn snapshot(&self) -> Result<MarkerSetResponse, MapError> {
        self.check_mounted()?;

        Ok(MarkerSetResponse {
            generation: self.generation,
            refreshed_at: self.refreshed_at,
            markers: self.markers.clone(),
        })
    }

    pub fn viewport(&self) -> Result<ViewportResponse, MapError> {
        self.check_mounted()?;

        Ok(self.viewport.clone())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dispose(&mut self) {
        self.markers.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn check_mounted(&self) -> Result<(), MapError> {
        if self.disposed {
            Err(MapError::LayerDisposed)
        } else {
            Ok(())
        }
    }
}
