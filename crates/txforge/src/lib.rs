//! # txforge
//!
//! Command-line front end for the `txforge` transaction codecs.
//!
//! The binary decodes raw Ethereum-like (RLP) and Cosmos-like (amino JSON)
//! transactions, assembles Cosmos sign documents, and manages the
//! configuration file that extends the currency registry. The library
//! exposes the same pieces for tests and embedding.
//!
//! ## Modules
//!
//! - [`cli`] - Argument definitions and command handlers
//! - [`logging`] - Subscriber setup for the binary
//!
//! ## Usage
//!
//! ```
//! use txforge::cli::args::{OutputFormat, ParseArgs};
//! use txforge::cli::commands::ParseCommand;
//! use txforge_core::CurrencyRegistry;
//!
//! let command = ParseCommand::cosmos(ParseArgs {
//!     input: r#"{"memo": "hello", "msgs": []}"#.to_string(),
//!     signed: false,
//!     currency: None,
//!     format: OutputFormat::Text,
//! });
//! let output = command.execute(&CurrencyRegistry::new()).unwrap();
//! assert!(output.contains("hello"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod logging;

pub use logging::{
    init_logging, new_correlation_id, verbosity_to_level, LogConfig, LogError, LogFormat,
    LogGuard, LogLevel,
};
