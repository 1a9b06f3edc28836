//! Configuration module for loading and parsing TOML configuration files.

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// PostgreSQL configuration; the in-memory store is used when absent.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// In-memory store configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Market calendar and symbols.
    #[serde(default)]
    pub market: MarketConfig,
    /// Compartment widths.
    #[serde(default)]
    pub compartment: CompartmentConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// PostgreSQL configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string.
    pub url: String,
    /// Whether to run migrations on startup.
    #[serde(default)]
    pub run_migrations: bool,
}

/// In-memory store configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// JSON snapshot of option records and spot prices to load at startup.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

/// Market calendar and symbol configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// IANA timezone of the exchange.
    pub timezone: String,
    /// strftime format of the day prefix in source timestamps.
    pub day_format: String,
    /// Symbol of the index whose option chain is analysed.
    pub index_symbol: String,
    /// Symbol of the banking index shown alongside.
    pub bank_index_symbol: String,
    /// Pins the trading day instead of following the wall clock.
    pub fixed_day: Option<NaiveDate>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Kolkata".to_string(),
            day_format: "%d-%b-%Y".to_string(),
            index_symbol: "NIFTY".to_string(),
            bank_index_symbol: "BANKNIFTY".to_string(),
            fixed_day: None,
        }
    }
}

/// Compartment width configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompartmentConfig {
    /// Number of strikes on each side of the ATM strike.
    pub strikes_per_compartment: u32,
    /// Distance between adjacent strikes, also the ATM rounding step.
    pub strike_step: i64,
    /// Extra depth added below the at-or-below compartments.
    pub lower_extension: i64,
}

impl Default for CompartmentConfig {
    fn default() -> Self {
        Self {
            strikes_per_compartment: 3,
            strike_step: 50,
            lower_extension: 50,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    /// Returns error if an existing file cannot be read or parsed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let market = &self.market;
        if market.index_symbol.is_empty() || market.bank_index_symbol.is_empty() {
            return Err(ConfigError::InvalidValue(
                "index symbols cannot be empty".to_string(),
            ));
        }
        if market.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(ConfigError::InvalidValue(format!(
                "unknown timezone: {}",
                market.timezone
            )));
        }
        if market.day_format.is_empty()
            || StrftimeItems::new(&market.day_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ConfigError::InvalidValue(format!(
                "invalid day format: {:?}",
                market.day_format
            )));
        }

        let compartment = &self.compartment;
        if compartment.strikes_per_compartment == 0 {
            return Err(ConfigError::InvalidValue(
                "strikes_per_compartment must be positive".to_string(),
            ));
        }
        if compartment.strike_step <= 0 {
            return Err(ConfigError::InvalidValue(
                "strike_step must be positive".to_string(),
            ));
        }
        if compartment.lower_extension < 0 {
            return Err(ConfigError::InvalidValue(
                "lower_extension cannot be negative".to_string(),
            ));
        }

        if let Some(database) = &self.database
            && database.url.is_empty()
        {
            return Err(ConfigError::InvalidValue(
                "database url cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
