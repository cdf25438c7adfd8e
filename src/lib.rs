pub mod app_state;
pub mod config;
pub mod labels;
pub mod logging;
pub mod model;
pub mod prediction;
pub mod render;
pub mod server;
