use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use reqwest::Url;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api.php";
pub const DEFAULT_LOG_FILE: &str = "sports_mapper.log";

/// Settings resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog endpoint every action is posted to
    pub api_url: Url,
    /// Where logs go while the terminal UI owns stdout
    pub log_file: PathBuf,
    pub debug: bool,
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Initializes the application configuration from `.env` and the process environment
pub fn init_app_config() -> Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    config_from(|key| env::var(key).ok())
}

/// Builds the configuration from any key lookup
pub fn config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let raw_url = lookup("MAPPER_API_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let api_url = Url::parse(raw_url.trim())
        .map_err(|e| eyre!("Invalid MAPPER_API_URL {raw_url:?}: {e}"))?;
    if !matches!(api_url.scheme(), "http" | "https") {
        return Err(eyre!(
            "MAPPER_API_URL must use http or https, got {}",
            api_url.scheme()
        ));
    }

    let log_file = lookup("MAPPER_LOG_FILE")
        .filter(|path| !path.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

    let debug = lookup("DEBUG").is_some_and(|value| is_truthy(&value));

    Ok(AppConfig {
        api_url,
        log_file,
        debug,
    })
}
