mod app_config;

pub use app_config::{config_from, init_app_config, AppConfig, DEFAULT_API_URL, DEFAULT_LOG_FILE};
