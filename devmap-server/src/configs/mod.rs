pub mod settings;

pub use settings::{Logger, Map, Refresh, Server, Settings, Source, Status};
