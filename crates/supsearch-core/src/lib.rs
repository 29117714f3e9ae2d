pub mod app_config;
pub mod config;
pub mod suppliers;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, load_app_config_with, ConfigError};
pub use suppliers::{SearchResponse, SupplierRecord};
