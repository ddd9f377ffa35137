pub mod app;
pub mod config;
pub mod core;
pub mod models;
pub mod server;
pub mod system;
pub mod utils;
