use std::time::Duration;

use serde::Deserialize;

use crate::domain::PricingConfig;
use crate::infrastructure::cache::QueryCacheConfig;
use crate::infrastructure::nivoda::{DEFAULT_API_URL, NivodaConfig};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub nivoda: NivodaSettings,
    pub cache: CacheSettings,
    pub pricing: PricingSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NivodaSettings {
    pub api_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub min_request_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl_secs: u64,
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub markup_percent: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for NivodaSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            min_request_interval_ms: 100,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 3600,
            max_capacity: 10_000,
        }
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            markup_percent: 10.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("NDC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn nivoda_config(&self) -> NivodaConfig {
        NivodaConfig {
            api_url: self.nivoda.api_url.clone(),
            api_key: self.nivoda.api_key.clone(),
            timeout: Duration::from_secs(self.nivoda.timeout_secs),
            min_request_interval: Duration::from_millis(self.nivoda.min_request_interval_ms),
        }
    }

    pub fn query_cache_config(&self) -> QueryCacheConfig {
        let config = QueryCacheConfig::default()
            .with_default_ttl(Duration::from_secs(self.cache.ttl_secs));

        if self.cache.enabled {
            config
        } else {
            config.disabled()
        }
    }

    pub fn pricing_config(&self) -> PricingConfig {
        PricingConfig::new(self.pricing.markup_percent)
    }
}
