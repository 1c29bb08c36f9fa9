pub mod mock_app;
pub mod mock_upstream;
