use std::collections::HashMap;

use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::{Validate, ValidationError};

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_CURRENCY: &str = "usd";
const DEFAULT_STORAGE_PATH: &str = "storefront-state.json";
const CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "STOREFRONT";

/// Delivery fee settings for the cash-on-delivery path.
///
/// Region keys are matched case-insensitively; unlisted regions fall back to
/// `default_rate`.
#[derive(Clone, Debug, Deserialize)]
pub struct DeliveryConfig {
    #[serde(default = "default_delivery_rate")]
    pub default_rate: Decimal,
    #[serde(default)]
    pub region_rates: HashMap<String, Decimal>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            default_rate: default_delivery_rate(),
            region_rates: HashMap::new(),
        }
    }
}

/// Application configuration with validation.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct AppConfig {
    /// Base URL of the storefront backend, e.g. `https://api.example.com/api`.
    #[validate(custom = "validate_server_url")]
    pub server_url: String,

    /// ISO currency code sent on payment-intent creation.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Path of the client-local persistence file (cart, access token).
    #[serde(default = "default_storage_path")]
    pub storage_path: String,

    /// Application environment.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Delivery fee table overrides for cash-on-delivery orders.
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_storage_path() -> String {
    DEFAULT_STORAGE_PATH.to_string()
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_delivery_rate() -> Decimal {
    Decimal::from(10)
}

fn validate_server_url(value: &str) -> Result<(), ValidationError> {
    url::Url::parse(value).map_err(|_| ValidationError::new("server_url"))?;
    Ok(())
}

/// Loads configuration from layered sources: `config/default`, an optional
/// per-environment file selected by `RUN_ENV`, an optional local override
/// file, then `STOREFRONT_*` environment variables.
pub fn load_config() -> Result<AppConfig, crate::errors::StorefrontError> {
    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());

    let config = Config::builder()
        .add_source(File::with_name(&format!("{CONFIG_DIR}/default")).required(false))
        .add_source(File::with_name(&format!("{CONFIG_DIR}/{run_env}")).required(false))
        .add_source(File::with_name(&format!("{CONFIG_DIR}/local")).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .map_err(|e| crate::errors::StorefrontError::Configuration(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| crate::errors::StorefrontError::Configuration(e.to_string()))?;

    app_config
        .validate()
        .map_err(|e| crate::errors::StorefrontError::Configuration(e.to_string()))?;

    info!(
        environment = %app_config.environment,
        server_url = %app_config.server_url,
        "configuration loaded"
    );
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config_with(server_url: &str) -> AppConfig {
        AppConfig {
            server_url: server_url.to_string(),
            currency: default_currency(),
            storage_path: default_storage_path(),
            environment: default_environment(),
            log_level: default_log_level(),
            delivery: DeliveryConfig::default(),
        }
    }

    #[test]
    fn valid_server_url_passes_validation() {
        assert!(config_with("https://api.example.com/api").validate().is_ok());
    }

    #[test]
    fn malformed_server_url_fails_validation() {
        assert!(config_with("not a url").validate().is_err());
    }

    #[test]
    fn delivery_defaults_to_flat_fallback_rate() {
        let delivery = DeliveryConfig::default();
        assert_eq!(delivery.default_rate, dec!(10));
        assert!(delivery.region_rates.is_empty());
    }

    #[test]
    fn deserializes_region_rate_overrides() {
        let json = r#"{
            "default_rate": "12.50",
            "region_rates": { "boston": "6.00" }
        }"#;
        let delivery: DeliveryConfig = serde_json::from_str(json).expect("delivery json");
        assert_eq!(delivery.default_rate, dec!(12.50));
        assert_eq!(delivery.region_rates.get("boston"), Some(&dec!(6.00)));
    }
}
