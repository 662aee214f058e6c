//! Application configuration management.

use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Daily check-in configuration.
    #[serde(default)]
    pub checkin: CheckinConfig,
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings as read from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Daily check-in configuration.
///
/// Passed by value into the check-in service; nothing reads it from global
/// state.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckinConfig {
    /// Quota granted per check-in. `<= 0` disables the feature.
    #[serde(default)]
    pub quota_per_sign: i64,
    /// Days after registration during which check-in is allowed.
    #[serde(default = "default_sign_in_days")]
    pub sign_in_days: i64,
    /// Lower bound of the configured reward range. Not used by grants.
    #[serde(default = "default_min_quota")]
    pub min_quota: i64,
    /// Upper bound of the configured reward range. Not used by grants.
    #[serde(default = "default_max_quota")]
    pub max_quota: i64,
    /// Timezone that defines calendar days.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    /// User groups that may not check in.
    #[serde(default)]
    pub disabled_groups: Vec<String>,
    /// Quota units per one currency unit, for display.
    #[serde(default = "default_quota_per_unit")]
    pub quota_per_unit: i64,
    /// Render quota amounts as currency instead of raw points.
    #[serde(default)]
    pub display_in_currency: bool,
}

fn default_sign_in_days() -> i64 {
    7
}

fn default_min_quota() -> i64 {
    1_000
}

fn default_max_quota() -> i64 {
    10_000
}

fn default_timezone() -> Tz {
    Tz::UTC
}

fn default_quota_per_unit() -> i64 {
    500_000
}

impl Default for CheckinConfig {
    fn default() -> Self {
        Self {
            quota_per_sign: 0,
            sign_in_days: default_sign_in_days(),
            min_quota: default_min_quota(),
            max_quota: default_max_quota(),
            timezone: default_timezone(),
            disabled_groups: Vec::new(),
            quota_per_unit: default_quota_per_unit(),
            display_in_currency: false,
        }
    }
}

/// Invalid check-in configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Window length cannot be negative.
    #[error("sign_in_days must not be negative, got {0}")]
    NegativeWindow(i64),

    /// Reward range is inverted.
    #[error("min_quota ({min}) must not exceed max_quota ({max})")]
    InvertedQuotaRange {
        /// Configured minimum.
        min: i64,
        /// Configured maximum.
        max: i64,
    },

    /// Display divisor must be positive.
    #[error("quota_per_unit must be positive, got {0}")]
    InvalidQuotaPerUnit(i64),
}

impl CheckinConfig {
    /// Returns true if check-in is switched on.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.quota_per_sign > 0
    }

    /// Checks the configuration for values the service cannot work with.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sign_in_days < 0 {
            return Err(ConfigError::NegativeWindow(self.sign_in_days));
        }
        if self.min_quota > self.max_quota {
            return Err(ConfigError::InvertedQuotaRange {
                min: self.min_quota,
                max: self.max_quota,
            });
        }
        if self.quota_per_unit <= 0 {
            return Err(ConfigError::InvalidQuotaPerUnit(self.quota_per_unit));
        }
        Ok(())
    }
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
            .add_source(
                config::Environment::with_prefix("CHECKIN")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("checkin.disabled_groups"),
            )
            .build()?;

        config.try_deserialize()
    }
}
