pub mod api;
pub mod map;
pub mod refresh;

pub use api::ApiError;
pub use map::MapError;
pub use refresh::RefreshError;

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde_json::json;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MapError(e) => (e.status_code(), e.to_string()),
        };

        let body = Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
