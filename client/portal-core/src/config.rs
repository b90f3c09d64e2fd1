use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    pub api_base_url: String,
    pub storage_dir: String,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub quiz_year: i32,
}

impl PortalConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        let api_base_url = settings
            .get_string("api.base_url")
            .or_else(|_| env::var("API_BASE_URL"))
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let storage_dir = settings
            .get_string("storage.dir")
            .or_else(|_| env::var("PORTAL_STORAGE_DIR"))
            .unwrap_or_else(|_| ".htportal".to_string());

        let request_timeout_secs = settings
            .get_int("api.request_timeout_secs")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(30);

        let poll_interval_secs = settings
            .get_int("polling.interval_secs")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(30);

        let quiz_year = settings
            .get_int("quiz.year")
            .ok()
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or_else(|| Utc::now().year());

        Ok(PortalConfig {
            api_base_url,
            storage_dir,
            request_timeout_secs,
            poll_interval_secs,
            quiz_year,
        })
    }
}
