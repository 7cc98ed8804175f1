pub mod config;
pub mod paths;

pub use config::{Config, DatabaseConfig, DefaultsConfig, LoggingConfig};
pub use paths::{home_override, PathManager};
