use serde::Deserialize;

use crate::infrastructure::notifier::DomainCreationPolicy;
use crate::infrastructure::store::SimpleDbConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub simpledb: SimpleDbConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
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

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// `simpledb` or `memory`
    pub backend: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    #[serde(default = "default_usage_domain")]
    pub usage_domain: String,
    #[serde(default = "default_subscription_domain")]
    pub subscription_domain: String,
    #[serde(default)]
    pub domain_creation: DomainCreationPolicy,
}

fn default_usage_domain() -> String {
    "FeatureUsage".to_string()
}

fn default_subscription_domain() -> String {
    "FeatureSubscription".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "simpledb".to_string(),
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            usage_domain: default_usage_domain(),
            subscription_domain: default_subscription_domain(),
            domain_creation: DomainCreationPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
