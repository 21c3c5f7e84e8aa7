//! # CLI Argument Definitions
//!
//! Command-line structure, declared with clap derive macros.
//!
//! - `txforge parse ethereum <HEX>` - Decode an RLP transaction
//! - `txforge parse cosmos <JSON|@FILE>` - Decode an amino JSON transaction
//! - `txforge build cosmos --chain-id <ID> ...` - Assemble a sign document
//! - `txforge currencies` - List known currencies and units
//! - `txforge config [path|show|init]` - Manage the configuration file
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level
//! - `-c, --config <PATH>` - Path to configuration file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Builds, encodes and decodes Ethereum-like and Cosmos-like transactions.
#[derive(Debug, Parser)]
#[command(name = "txforge")]
#[command(author, version, about = "Transaction codec toolkit for Ethereum and Cosmos chains")]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    ///
    /// Defaults to `~/.txforge/config.toml`.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode a raw transaction
    Parse {
        /// Chain family of the input
        #[command(subcommand)]
        chain: ParseCommands,
    },

    /// Assemble an unsigned transaction and print what must be signed
    Build {
        /// Chain family to build for
        #[command(subcommand)]
        chain: BuildCommands,
    },

    /// List known currencies and their units
    ///
    /// Includes the built-in currencies and those declared in the
    /// configuration file.
    Currencies,

    /// View or initialize configuration
    ///
    /// Without a subcommand, displays the effective configuration.
    Config {
        /// Configuration action to perform
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Chain families accepted by `parse`.
#[derive(Debug, Subcommand)]
pub enum ParseCommands {
    /// Decode an RLP-encoded legacy transaction given as hex
    Ethereum(ParseArgs),

    /// Decode an amino JSON sign document or broadcast transaction
    ///
    /// The input is the JSON text itself, or `@PATH` to read it from a file.
    Cosmos(ParseArgs),
}

/// Arguments shared by the `parse` subcommands.
#[derive(Debug, Clone, Args)]
pub struct ParseArgs {
    /// Raw transaction (hex for Ethereum, JSON or `@FILE` for Cosmos)
    #[arg(value_name = "RAW")]
    pub input: String,

    /// Read and attach the signature
    #[arg(short, long)]
    pub signed: bool,

    /// Currency to parse against (defaults to the chain's native currency)
    #[arg(long, value_name = "NAME")]
    pub currency: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,
}

/// Chain families accepted by `build`.
#[derive(Debug, Subcommand)]
pub enum BuildCommands {
    /// Assemble a Cosmos transaction and print its sign document
    Cosmos(CosmosBuildArgs),
}

/// Arguments for `build cosmos`.
#[derive(Debug, Clone, Args)]
pub struct CosmosBuildArgs {
    /// Chain id included in the sign document
    #[arg(long, value_name = "ID")]
    pub chain_id: String,

    /// Gas limit
    #[arg(long, value_name = "AMOUNT")]
    pub gas: String,

    /// Fee, in the currency's base unit
    #[arg(long, value_name = "AMOUNT")]
    pub fee: String,

    /// Factor applied to the gas limit, rounded up
    #[arg(long, value_name = "FACTOR")]
    pub gas_adjustment: Option<f64>,

    /// Transaction memo
    #[arg(long)]
    pub memo: Option<String>,

    /// Account number of the signer
    #[arg(long, value_name = "NUMBER")]
    pub account_number: Option<String>,

    /// Sequence of the signer
    #[arg(long, value_name = "NUMBER")]
    pub sequence: Option<String>,

    /// Amino JSON message, or `@FILE`; repeat for several messages
    #[arg(long = "msg", value_name = "JSON")]
    pub messages: Vec<String>,

    /// Correlation id for log events (generated when absent)
    #[arg(long, value_name = "ID")]
    pub correlation_id: Option<String>,
}

/// Configuration-related actions.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show configuration file path
    Path,

    /// Display the effective configuration as TOML
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for decoded transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned `key: value` lines
    #[default]
    Text,

    /// The transaction as JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
