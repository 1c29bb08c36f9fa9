pub mod geo;
pub mod models;
