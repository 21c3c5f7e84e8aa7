//! # CLI Command Handlers
//!
//! - [`parse`] - Decode raw Ethereum and Cosmos transactions
//! - [`build`] - Assemble a Cosmos sign document
//! - [`currencies`] - List the currency registry
//! - [`config`] - Configuration management
//!
//! Each handler exposes `execute`, which returns the text to print, and
//! `run`, which prints it. Failures are per-command error enums; `main`
//! turns them into a message on stderr and [`exit_codes::EXIT_ERROR`].

pub mod build;
pub mod config;
pub mod currencies;
pub mod exit_codes;
pub mod parse;

pub use build::{BuildCommandError, CosmosBuildCommand};
pub use config::{resolve_loader, ConfigCommand, ConfigCommandError};
pub use currencies::CurrenciesCommand;
pub use parse::{read_input, ParseCommand, ParseCommandError};
