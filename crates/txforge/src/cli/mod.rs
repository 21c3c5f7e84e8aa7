//! # CLI Module
//!
//! Command-line interface for `txforge`.
//!
//! - [`args`] - Argument parsing and CLI structure definitions
//! - [`commands`] - Command handler implementations
//!
//! ```no_run
//! use clap::Parser;
//! use txforge::cli::{Cli, Commands};
//!
//! let cli = Cli::parse();
//! if let Commands::Currencies = cli.command {
//!     // list currencies
//! }
//! ```

pub mod args;
pub mod commands;

pub use args::{
    BuildCommands, Cli, Commands, ConfigAction, CosmosBuildArgs, OutputFormat, ParseArgs,
    ParseCommands,
};
