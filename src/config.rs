//! Configuration module
//!
//! Reads `config.toml` from `~/.config/taxi-fare/` (or the path given by
//! `TAXI_FARE_CONFIG` / `--config`). Every section and key is optional.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! shutdown_timeout = 30
//!
//! [database]
//! url = "sqlite://./taxi_fare.db?mode=rwc"
//! max_connections = 5
//!
//! [logging]
//! level = "info"
//! format = "text"   # or "json"
//!
//! [pricing]
//! currency = "PHP"
//! max_distance_km = 1000
//! default_vehicle_type = "motorcycle"
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::fare::DEFAULT_MAX_DISTANCE_KM;
use crate::infrastructure::DatabaseConfig;

/// Environment variable pointing at the config file
pub const CONFIG_PATH_ENV: &str = "TAXI_FARE_CONFIG";
/// Environment variable overriding `database.url`
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

impl From<&DatabaseSettings> for DatabaseConfig {
    fn from(settings: &DatabaseSettings) -> Self {
        Self {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive, e.g. `info` or `taxi_fare=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Currency code appended to formatted totals
    pub currency: String,
    /// Longest accepted trip, in km
    pub max_distance_km: Decimal,
    /// Vehicle type used when a request names none
    pub default_vehicle_type: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: "PHP".to_string(),
            max_distance_km: Decimal::from(DEFAULT_MAX_DISTANCE_KM),
            default_vehicle_type: "motorcycle".to_string(),
        }
    }
}

/// `<config dir>/taxi-fare/config.toml`, relative to the working
/// directory when the platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taxi-fare")
        .join("config.toml")
}

/// Path from `TAXI_FARE_CONFIG`, falling back to [`default_config_path`].
pub fn config_path_from_env() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path())
}

impl AppConfig {
    /// Load from `path`. A missing file yields defaults. `DATABASE_URL`
    /// overrides `database.url` either way.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.database.url = url;
            }
        }

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::from(&self.database)
    }

    /// Reject values the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".into()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level must not be empty".into()));
        }
        if self.pricing.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("pricing.currency must not be empty".into()));
        }
        if self.pricing.max_distance_km <= Decimal::ZERO {
            return Err(ConfigError::Invalid(
                "pricing.max_distance_km must be positive".into(),
            ));
        }
        if self.pricing.default_vehicle_type.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "pricing.default_vehicle_type must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.address(), "0.0.0.0:8080");
        assert_eq!(config.database.url, "sqlite://./taxi_fare.db?mode=rwc");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.pricing.max_distance_km, Decimal::from(1000));
        assert_eq!(config.pricing.default_vehicle_type, "motorcycle");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::parse(
            r#"
            [server]
            port = 9090

            [logging]
            format = "json"

            [pricing]
            currency = "USD"
            max_distance_km = 250.5
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.pricing.currency, "USD");
        assert_eq!(config.pricing.max_distance_km, Decimal::new(2505, 1));
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = AppConfig::parse("[server\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let err = AppConfig::parse("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.pricing.max_distance_km = Decimal::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.pricing.currency = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_path_ends_with_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("taxi-fare/config.toml"));
    }

    #[test]
    fn test_database_config_conversion() {
        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".into();
        config.database.max_connections = 3;
        let db = config.database_config();
        assert_eq!(db.url, "sqlite::memory:");
        assert_eq!(db.max_connections, 3);
    }
}
