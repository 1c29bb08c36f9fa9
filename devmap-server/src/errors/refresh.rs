/// Failures that end a refresh cycle without touching the markers.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Upstream responded with HTTP {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RefreshError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => RefreshError::Status(status.as_u16()),
            None => RefreshError::Network(err.to_string()),
        }
    }
}
