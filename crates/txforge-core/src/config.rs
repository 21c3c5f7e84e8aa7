//! Configuration types for `txforge`.
//!
//! Configuration is stored in TOML format at `~/.txforge/config.toml`. It has
//! two sections: logging defaults for the CLI, and additional currencies that
//! extend the built-in [`CurrencyRegistry`](crate::currency::CurrencyRegistry).
//!
//! # Examples
//!
//! ```
//! use txforge_core::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.logging.level, "info");
//! assert!(config.currencies.is_empty());
//!
//! let toml_str = Config::default_toml();
//! let parsed: Config = toml::from_str(&toml_str).unwrap();
//! assert_eq!(parsed, config);
//! ```
//!
//! # Default TOML Output
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "pretty"
//! # file = "~/.txforge/logs"
//!
//! # [[currencies]]
//! # name = "osmosis"
//! # bip44_coin_type = 118
//! # units = [
//! #     { name = "uosmo", symbol = "uosmo", code = "uosmo", number_of_decimals = 0 },
//! #     { name = "osmo", symbol = "OSMO", code = "osmo", number_of_decimals = 6 },
//! # ]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::ConfigError;

/// Log levels accepted in `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Output formats accepted in `logging.format`.
pub const LOG_FORMATS: &[&str] = &["pretty", "json", "compact"];

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use txforge_core::config::Config;
///
/// let toml_str = r#"
/// [logging]
/// level = "debug"
///
/// [[currencies]]
/// name = "osmosis"
/// bip44_coin_type = 118
/// units = [{ name = "uosmo", symbol = "uosmo", code = "uosmo", number_of_decimals = 0 }]
/// "#;
///
/// let config: Config = toml::from_str(toml_str).expect("valid TOML");
/// assert_eq!(config.logging.level, "debug");
/// assert_eq!(config.logging.format, "pretty");
/// assert_eq!(config.currencies[0].name, "osmosis");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Logging defaults.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Currencies added to the built-in registry.
    #[serde(default)]
    pub currencies: Vec<Currency>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

/// Logging defaults, overridden by CLI verbosity flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level, one of [`LOG_LEVELS`].
    ///
    /// Default: `info`
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format, one of [`LOG_FORMATS`].
    ///
    /// Default: `pretty`
    #[serde(default = "default_format")]
    pub format: String,

    /// Directory for daily-rotated log files. Logs go to stderr only when
    /// unset. Supports `~` expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file: None,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if:
    /// - `logging.level` is not one of [`LOG_LEVELS`]
    /// - `logging.format` is not one of [`LOG_FORMATS`]
    /// - a currency has an empty name or no units
    /// - two currencies share a name
    /// - a currency has two units with the same name
    ///
    /// # Examples
    ///
    /// ```
    /// use txforge_core::config::Config;
    ///
    /// assert!(Config::default().validate().is_ok());
    ///
    /// let mut invalid = Config::default();
    /// invalid.logging.level = "loud".to_string();
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                &self.logging.level,
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.format",
                &self.logging.format,
            ));
        }

        let mut names = HashSet::new();
        for currency in &self.currencies {
            if currency.name.is_empty() {
                return Err(ConfigError::invalid_value("currencies.name", "<empty>"));
            }
            if !names.insert(currency.name.as_str()) {
                return Err(ConfigError::invalid_value(
                    "currencies.name",
                    format!("{} (duplicate)", currency.name),
                ));
            }
            if currency.units.is_empty() {
                return Err(ConfigError::invalid_value(
                    format!("currencies.{}.units", currency.name),
                    "<empty>",
                ));
            }

            let mut units = HashSet::new();
            for unit in &currency.units {
                if !units.insert(unit.name.as_str()) {
                    return Err(ConfigError::invalid_value(
                        format!("currencies.{}.units", currency.name),
                        format!("{} (duplicate)", unit.name),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Generates the default configuration as a TOML string, with the
    /// optional settings commented out.
    #[must_use]
    pub fn default_toml() -> String {
        r#"[logging]
level = "info"
format = "pretty"
# file = "~/.txforge/logs"

# [[currencies]]
# name = "osmosis"
# bip44_coin_type = 118
# units = [
#     { name = "uosmo", symbol = "uosmo", code = "uosmo", number_of_decimals = 0 },
#     { name = "osmo", symbol = "OSMO", code = "osmo", number_of_decimals = 6 },
# ]
"#
        .to_string()
    }

    /// Creates a configuration builder for customizing values.
    ///
    /// # Examples
    ///
    /// ```
    /// use txforge_core::config::Config;
    ///
    /// let config = Config::builder()
    ///     .log_level("debug")
    ///     .log_format("json")
    ///     .build();
    ///
    /// assert_eq!(config.logging.format, "json");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for creating customized [`Config`] instances.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the log level.
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Sets the log format.
    #[must_use]
    pub fn log_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    /// Sets the log file directory.
    #[must_use]
    pub fn log_file(mut self, dir: impl Into<String>) -> Self {
        self.config.logging.file = Some(dir.into());
        self
    }

    /// Adds a currency.
    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.config.currencies.push(currency);
        self
    }

    /// Builds the final configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
