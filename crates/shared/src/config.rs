//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Hosted row store configuration.
    pub store: StoreConfig,
    /// Workflow webhook configuration.
    #[serde(default)]
    pub webhook: WebhookConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Hosted row store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the row storage service.
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

fn default_store_timeout() -> u64 {
    30
}

/// Workflow webhook configuration (spreadsheet proxy).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookConfig {
    /// Webhook endpoint URL. The webhook is disabled when unset.
    pub url: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TOURDESK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
