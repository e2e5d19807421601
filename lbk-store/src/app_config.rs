use lbk_order::audit::DEFAULT_ORDER_LOG_CAPACITY;
use lbk_order::VendorDirectory;
use lbk_shipping::RateTable;
use lbk_core::analytics::DEFAULT_ANALYTICS_CAPACITY;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub messaging: MessagingConfig,
    /// Shipping tariffs; changing them is a configuration deploy
    #[serde(default)]
    pub rates: RateTable,
    #[serde(default)]
    pub vendors: VendorDirectory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    pub redis_url: Option<String>,
    #[serde(default = "default_order_log_capacity")]
    pub order_log_capacity: usize,
    #[serde(default = "default_analytics_capacity")]
    pub analytics_capacity: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            redis_url: None,
            order_log_capacity: default_order_log_capacity(),
            analytics_capacity: default_analytics_capacity(),
        }
    }
}

fn default_order_log_capacity() -> usize { DEFAULT_ORDER_LOG_CAPACITY }
fn default_analytics_capacity() -> usize { DEFAULT_ANALYTICS_CAPACITY }

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Remote product feed; the cache and built-in products are used without it
    pub url: Option<String>,
    #[serde(default = "default_catalog_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: default_catalog_timeout_ms(),
        }
    }
}

fn default_catalog_timeout_ms() -> u64 { 5000 }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MessagingConfig {
    pub whatsapp_base_url: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            whatsapp_base_url: "https://wa.me".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(Self::environment());

        Self::build(builder)
    }

    /// Variables such as `LBK__SERVER__PORT=8080`; the prefix takes the same
    /// double underscore as nested keys
    fn environment() -> config::Environment {
        config::Environment::with_prefix("LBK").separator("__")
    }

    /// Parse a TOML document, without files or environment
    pub fn from_toml(raw: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml));

        Self::build(builder)
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self, config::ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config
            .rates
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(config)
    }
}
