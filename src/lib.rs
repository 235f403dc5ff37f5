pub mod app;
pub mod error;
pub mod upload;
pub mod utils;
