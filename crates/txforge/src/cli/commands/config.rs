//! # Config Command
//!
//! Implementation of `txforge config`, which shows and initializes the
//! configuration file.
//!
//! ```text
//! txforge config              # Display the effective configuration
//! txforge config show         # Same as above
//! txforge config path         # Show the configuration file path
//! txforge config init         # Write the default configuration
//! txforge config init --force # Overwrite an existing file
//! ```

use std::path::Path;

use txforge_core::config::Config;
use txforge_core::config_loader::ConfigLoader;
use txforge_core::error::ConfigError;

use crate::cli::args::ConfigAction;

// ============================================================================
// ConfigCommandError
// ============================================================================

/// Errors that can occur during config command execution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// `config init` would overwrite an existing file.
    #[error("Configuration already exists at {0}. Use --force to overwrite.")]
    AlreadyExists(String),

    /// Loading, validating or writing the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),
}

// ============================================================================
// Loader resolution
// ============================================================================

/// The loader for `--config PATH`, or for `~/.txforge/config.toml` when no
/// path is given.
///
/// # Errors
///
/// Returns the [`ConfigError`] of [`ConfigLoader::for_file`] or
/// [`ConfigLoader::new`].
pub fn resolve_loader(config_path: Option<&Path>) -> Result<ConfigLoader, ConfigError> {
    match config_path {
        Some(path) => ConfigLoader::for_file(&path.to_string_lossy()),
        None => ConfigLoader::new(),
    }
}

// ============================================================================
// ConfigCommand
// ============================================================================

/// The `txforge config` command handler.
#[derive(Debug, Clone)]
pub struct ConfigCommand {
    /// The action to perform (None = show config).
    pub action: Option<ConfigAction>,
    loader: ConfigLoader,
}

impl ConfigCommand {
    /// Create a `ConfigCommand` operating on `loader`'s file.
    #[must_use]
    pub const fn new(action: Option<ConfigAction>, loader: ConfigLoader) -> Self {
        Self { action, loader }
    }

    /// Run the command and print its output.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn run(&self) -> Result<(), ConfigCommandError> {
        println!("{}", self.execute()?);
        Ok(())
    }

    /// Run the command and return its output.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigCommandError::AlreadyExists`] for `init` without
    /// `--force` on an existing file, and [`ConfigCommandError::Config`] when
    /// the file cannot be read, validated or written.
    pub fn execute(&self) -> Result<String, ConfigCommandError> {
        match &self.action {
            None | Some(ConfigAction::Show) => self.show_config(),
            Some(ConfigAction::Path) => Ok(self.loader.config_path().display().to_string()),
            Some(ConfigAction::Init { force }) => self.init_config(*force),
        }
    }

    /// The effective configuration: the file when present, the defaults
    /// otherwise.
    fn show_config(&self) -> Result<String, ConfigCommandError> {
        let config = self.loader.load()?;
        format_toml_output(&config)
    }

    fn init_config(&self, force: bool) -> Result<String, ConfigCommandError> {
        let path = self.loader.config_path();
        if self.loader.exists() && !force {
            return Err(ConfigCommandError::AlreadyExists(
                path.display().to_string(),
            ));
        }

        self.loader.write_default()?;
        tracing::info!(path = %path.display(), force, "wrote default configuration");
        Ok(format!("Wrote default configuration to {}", path.display()))
    }
}

fn format_toml_output(config: &Config) -> Result<String, ConfigCommandError> {
    toml::to_string_pretty(config).map_err(|e| ConfigCommandError::Serialize(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
