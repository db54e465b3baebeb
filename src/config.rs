//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every field has a default, so an empty file (or no file at all) selects
//! the stock AIOC ids and `warn` level logging.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{AiocError, Result};
use crate::protocol::{AIOC_PRODUCT_ID, AIOC_VENDOR_ID};

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Device selection
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    #[serde(default = "default_vendor_id")]
    pub vendor_id: u16,

    #[serde(default = "default_product_id")]
    pub product_id: u16,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_vendor_id() -> u16 { AIOC_VENDOR_ID }
fn default_product_id() -> u16 { AIOC_PRODUCT_ID }
fn default_log_level() -> String { "warn".to_string() }

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            vendor_id: default_vendor_id(),
            product_id: default_product_id(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use aioc_util::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.device.vendor_id == 0 {
            return Err(AiocError::Config(toml::de::Error::custom(
                "vendor_id cannot be 0",
            )));
        }

        if self.device.product_id == 0 {
            return Err(AiocError::Config(toml::de::Error::custom(
                "product_id cannot be 0",
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(AiocError::Config(toml::de::Error::custom(format!(
                "logging level '{}' must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ))));
        }

        Ok(())
    }
}
