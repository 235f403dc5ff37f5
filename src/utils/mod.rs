pub mod file_size;
pub mod server_config;
