//! # txforge
//!
//! ```bash
//! txforge parse ethereum 0xf86c...
//! txforge parse cosmos @tx.json --signed --format json
//! txforge build cosmos --chain-id cosmoshub-4 --gas 200000 --fee 5000 --msg @send.json
//! txforge currencies
//! txforge config init
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::process::ExitCode;

use clap::Parser;
use txforge::cli::commands::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use txforge::cli::commands::{
    resolve_loader, BuildCommandError, ConfigCommand, ConfigCommandError, CosmosBuildCommand,
    CurrenciesCommand, ParseCommand, ParseCommandError,
};
use txforge::cli::{BuildCommands, Cli, Commands, ParseCommands};
use txforge::logging::{init_logging, verbosity_to_level, LogConfig, LogError, LogGuard};
use txforge_core::error::{ConfigError, ErrorCode};
use txforge_core::{Config, ConfigLoader, Currency, CurrencyRegistry};

/// Failure of any command, as reported on stderr.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Log(#[from] LogError),
    #[error(transparent)]
    ConfigCommand(#[from] ConfigCommandError),
    #[error(transparent)]
    Parse(#[from] ParseCommandError),
    #[error(transparent)]
    Build(#[from] BuildCommandError),
    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl CliError {
    /// Library error code behind the failure, when there is one.
    fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Config(_) | Self::ConfigCommand(ConfigCommandError::Config(_)) => {
                Some(ErrorCode::ConfigurationFailed)
            }
            Self::Parse(ParseCommandError::Parse(e))
            | Self::Build(BuildCommandError::Message { source: e, .. }) => Some(e.into()),
            Self::Build(BuildCommandError::Build(e)) => Some(e.code()),
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => exit_code(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code(EXIT_ERROR)
        }
    }
}

/// Failures are logged before the log guard goes out of scope.
fn run(cli: Cli) -> Result<(), CliError> {
    let loader = resolve_loader(cli.config.as_deref())?;

    // `config` must work on a broken file, so it never loads it up front
    if let Commands::Config { action } = cli.command {
        let _guard = init_logging(&LogConfig {
            level: verbosity_to_level(cli.verbose),
            ..LogConfig::default()
        })?;
        return ConfigCommand::new(action, loader)
            .run()
            .map_err(|e| logged(e.into()));
    }

    let config = loader.load()?;
    let _guard = start_logging(&config, cli.verbose)?;
    execute(cli.command, &loader, &config).map_err(logged)
}

fn execute(command: Commands, loader: &ConfigLoader, config: &Config) -> Result<(), CliError> {
    let currencies = CurrencyRegistry::with_config(config)?;
    tracing::debug!(
        config = %loader.config_path().display(),
        currencies = currencies.len(),
        "configuration loaded"
    );

    match command {
        Commands::Parse {
            chain: ParseCommands::Ethereum(args),
        } => ParseCommand::ethereum(args).run(&currencies)?,
        Commands::Parse {
            chain: ParseCommands::Cosmos(args),
        } => ParseCommand::cosmos(args).run(&currencies)?,
        Commands::Build {
            chain: BuildCommands::Cosmos(args),
        } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(CliError::Runtime)?;
            let currency = currencies.get("atom").cloned().unwrap_or_else(Currency::atom);
            CosmosBuildCommand::new(args, currency).run(&runtime)?;
        }
        Commands::Currencies => CurrenciesCommand::new(currencies).run(),
        Commands::Config { .. } => {}
    }
    Ok(())
}

fn logged(error: CliError) -> CliError {
    match error.code() {
        Some(code) => tracing::error!(error = %error, %code, "command failed"),
        None => tracing::error!(error = %error, "command failed"),
    }
    error
}

/// Logging from the `[logging]` section, with `-v` flags taking precedence.
fn start_logging(config: &Config, verbose: u8) -> Result<LogGuard, CliError> {
    let log_config = LogConfig::from_config(&config.logging, verbose)?;
    Ok(init_logging(&log_config)?)
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
