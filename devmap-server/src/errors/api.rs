use super::MapError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Map error: {0}")]
    MapError(#[from] MapError),
}
