mod device;
mod feed;
mod map;
mod marker;
mod refresh;

pub use device::*;
pub use feed::*;
pub use map::*;
pub use marker::*;
pub use refresh::*;
