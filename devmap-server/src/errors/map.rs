use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Marker not found")]
    MarkerNotFound,

    #[error("Marker layer disposed")]
    LayerDisposed,
}

impl MapError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MapError::MarkerNotFound => StatusCode::NOT_FOUND,
            MapError::LayerDisposed => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
