//! Configuration file loading and saving.
//!
//! Configuration lives at `~/.txforge/config.toml` by default. A missing file
//! is not an error for [`ConfigLoader::load`]: the defaults are returned. Files
//! that exist are parsed and validated.
//!
//! # Examples
//!
//! ```no_run
//! use txforge_core::config_loader::ConfigLoader;
//!
//! let loader = ConfigLoader::new().expect("home directory");
//! if !loader.exists() {
//!     loader.write_default().expect("write default config");
//! }
//! let config = loader.load().expect("load config");
//! println!("log level: {}", config.logging.level);
//! ```
//!
//! ```
//! use txforge_core::config_loader::ConfigLoader;
//! use std::path::PathBuf;
//!
//! let loader = ConfigLoader::with_base_dir(PathBuf::from("/etc/txforge"));
//! assert_eq!(loader.config_path(), PathBuf::from("/etc/txforge/config.toml"));
//! ```

use crate::config::Config;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// The configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// The base directory name within the home directory.
const BASE_DIR_NAME: &str = ".txforge";

/// Reads and writes the configuration file under a base directory.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Base directory for `txforge` files (default: ~/.txforge).
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader for the default base directory (`~/.txforge`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] if the home directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let base_dir = default_base_dir()?;
        Ok(Self { base_dir })
    }

    /// Creates a loader for a custom base directory.
    #[must_use]
    pub const fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Creates a loader for an explicit configuration file path, as given by
    /// `--config`. The file's parent directory becomes the base directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the path does not end in
    /// `config.toml`, or [`ConfigError::NoHomeDirectory`] if `~` cannot be
    /// expanded.
    pub fn for_file(path: &str) -> Result<Self, ConfigError> {
        let path = expand_path(path)?;
        if path.file_name().and_then(|name| name.to_str()) != Some(CONFIG_FILE_NAME) {
            return Err(ConfigError::invalid_value(
                "config path",
                format!("{} (expected a file named {CONFIG_FILE_NAME})", path.display()),
            ));
        }
        let base_dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(Self { base_dir })
    }

    /// Returns the path to the configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE_NAME)
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Loads configuration from the file, or the defaults if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseFailed`] if the file contains invalid TOML,
    /// [`ConfigError::InvalidValue`] if it fails [`Config::validate`], and
    /// [`ConfigError::Io`] if the file cannot be read.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Loads configuration from the file, failing if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] if the configuration file doesn't
    /// exist, otherwise the errors of [`load`](Self::load).
    pub fn load_required(&self) -> Result<Config, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Err(ConfigError::file_not_found(
                config_path.display().to_string(),
            ));
        }

        Self::load_from_path(&config_path)
    }

    /// Saves configuration to the file, creating the base directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] on write failure and
    /// [`ConfigError::ParseFailed`] if the configuration cannot be serialized.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        self.ensure_base_dir()?;

        let config_path = self.config_path();

        let toml_str = toml::to_string_pretty(config).map_err(|e| {
            ConfigError::parse_failed(format!("failed to serialize configuration: {e}"))
        })?;

        fs::write(&config_path, toml_str).map_err(|e| {
            ConfigError::io(
                format!("failed to write configuration to {}", config_path.display()),
                e,
            )
        })?;

        Ok(())
    }

    /// Writes [`Config::default_toml`] to the file, creating the base
    /// directory if needed. An existing file is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if there's an I/O error writing the file.
    pub fn write_default(&self) -> Result<(), ConfigError> {
        self.ensure_base_dir()?;

        let config_path = self.config_path();

        fs::write(&config_path, Config::default_toml()).map_err(|e| {
            ConfigError::io(
                format!(
                    "failed to write default configuration to {}",
                    config_path.display()
                ),
                e,
            )
        })?;

        Ok(())
    }

    /// Checks if the configuration file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.config_path().exists()
    }

    fn ensure_base_dir(&self) -> Result<(), ConfigError> {
        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir).map_err(|e| {
                ConfigError::io(
                    format!(
                        "failed to create base directory {}",
                        self.base_dir.display()
                    ),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::io(format!("failed to read {}", path.display()), e))?;

        let mut config: Config = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_failed(format!("invalid TOML in {}: {e}", path.display()))
        })?;
        config.validate()?;

        if let Some(file) = config.logging.file.take() {
            config.logging.file = Some(expand_path(&file)?.to_string_lossy().into_owned());
        }

        tracing::debug!(
            path = %path.display(),
            currencies = config.currencies.len(),
            "loaded configuration"
        );
        Ok(config)
    }
}

/// Expands a leading `~` to the home directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the path starts with `~` and
/// the home directory cannot be determined.
///
/// # Examples
///
/// ```
/// use txforge_core::config_loader::expand_path;
///
/// let path = expand_path("/etc/txforge/config.toml").unwrap();
/// assert_eq!(path.to_string_lossy(), "/etc/txforge/config.toml");
/// ```
pub fn expand_path(path: &str) -> Result<PathBuf, ConfigError> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(ConfigError::no_home_directory)?;
        Ok(home.join(rest))
    } else if path == "~" {
        dirs::home_dir().ok_or_else(ConfigError::no_home_directory)
    } else {
        Ok(PathBuf::from(path))
    }
}

/// Returns the default base directory (`~/.txforge`).
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the home directory cannot be determined.
pub fn default_base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(ConfigError::no_home_directory)?;
    Ok(home.join(BASE_DIR_NAME))
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::indexing_slicing,
        clippy::needless_raw_string_hashes
    )]

    use super::*;
    use crate::currency::Currency;
    use std::fs;
    use tempfile::TempDir;

    // -------------------------------------------------------------------------
    // expand_path
    // -------------------------------------------------------------------------

    #[test]
    fn test_expand_path_with_tilde_prefix() {
        let expanded = expand_path("~/.txforge/config.toml").unwrap();
        let home = dirs::home_dir().unwrap();
        assert_eq!(expanded, home.join(".txforge/config.toml"));
    }

    #[test]
    fn test_expand_path_leaves_other_paths() {
        assert_eq!(expand_path("/abs/path").unwrap(), PathBuf::from("/abs/path"));
        assert_eq!(expand_path("rel/path").unwrap(), PathBuf::from("rel/path"));
        assert_eq!(expand_path("/a/~/b").unwrap(), PathBuf::from("/a/~/b"));
    }

    #[test]
    fn test_default_base_dir() {
        let base = default_base_dir().unwrap();
        assert!(base.ends_with(".txforge"));
    }

    // -------------------------------------------------------------------------
    // ConfigLoader
    // -------------------------------------------------------------------------

    #[test]
    fn test_for_file() {
        let loader = ConfigLoader::for_file("/etc/txforge/config.toml").unwrap();
        assert_eq!(loader.base_dir(), Path::new("/etc/txforge"));

        assert!(matches!(
            ConfigLoader::for_file("/etc/txforge/settings.toml"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_with_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let loader = ConfigLoader::with_base_dir(temp.path().to_path_buf());

        assert!(!loader.exists());
        assert_eq!(loader.load().unwrap(), Config::default());
    }

    #[test]
    fn test_load_required_with_missing_file_returns_error() {
        let temp = TempDir::new().unwrap();
        let loader = ConfigLoader::with_base_dir(temp.path().to_path_buf());

        assert!(matches!(
            loader.load_required(),
            Err(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_with_invalid_toml_returns_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "[logging\nlevel=").unwrap();
        let loader = ConfigLoader::with_base_dir(temp.path().to_path_buf());

        assert!(matches!(loader.load(), Err(ConfigError::ParseFailed { .. })));
    }

    #[test]
    fn test_load_validates() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            "[logging]\nlevel = \"shouting\"\n",
        )
        .unwrap();
        let loader = ConfigLoader::with_base_dir(temp.path().to_path_buf());

        assert!(matches!(loader.load(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_expands_log_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            "[logging]\nfile = \"~/txforge-logs\"\n",
        )
        .unwrap();
        let loader = ConfigLoader::with_base_dir(temp.path().to_path_buf());

        let config = loader.load().unwrap();
        let home = dirs::home_dir().unwrap();
        assert_eq!(
            config.logging.file.as_deref().map(PathBuf::from),
            Some(home.join("txforge-logs"))
        );
    }

    #[test]
    fn test_write_default_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let loader = ConfigLoader::with_base_dir(temp.path().join("a").join("b"));

        loader.write_default().unwrap();

        assert!(loader.exists());
        assert_eq!(loader.load_required().unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let loader = ConfigLoader::with_base_dir(temp.path().to_path_buf());
        let config = Config::builder()
            .log_format("json")
            .currency(Currency::atom())
            .build();

        loader.save(&config).unwrap();

        assert_eq!(loader.load().unwrap(), config);
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let loader = ConfigLoader::with_base_dir(temp.path().to_path_buf());

        loader.write_default().unwrap();
        loader
            .save(&Config::builder().log_level("error").build())
            .unwrap();

        assert_eq!(loader.load().unwrap().logging.level, "error");
    }
}
