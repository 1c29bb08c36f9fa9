mod device_source;
mod marker_layer;
mod marker_service;
mod refresh_service;
mod status_policy;

pub use device_source::*;
pub use marker_layer::*;
pub use marker_service::*;
pub use refresh_service::*;
pub use status_policy::*;
