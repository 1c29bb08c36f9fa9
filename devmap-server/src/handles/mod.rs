mod docs_handle;
mod map_handle;
mod refresh_handle;

pub use docs_handle::*;
pub use map_handle::*;
pub use refresh_handle::*;
