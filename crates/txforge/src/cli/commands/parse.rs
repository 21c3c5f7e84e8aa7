//! # Parse Command
//!
//! `txforge parse ethereum <HEX>` and `txforge parse cosmos <JSON|@FILE>`.
//!
//! Both decode through a [`ChainRegistry`]. `--currency` swaps the chain's
//! native currency for one from the [`CurrencyRegistry`], which is how
//! configured currencies (an osmosis-like chain, for instance) are parsed.

use std::fmt::Write as _;
use std::path::Path;

use alloy_primitives::hex;
use txforge_chain::cosmos::{CosmosMessage, CosmosTransaction};
use txforge_chain::ethereum::EthereumTransaction;
use txforge_chain::{ChainRegistry, CosmosParser, EthereumParser, ParsedTransaction};
use txforge_core::error::ParseError;
use txforge_core::{scale_to_display, BigInt, Currency, CurrencyRegistry};

use crate::cli::args::{OutputFormat, ParseArgs};

/// Chain id of the Ethereum-like parser.
pub const ETHEREUM: &str = "ethereum";

/// Chain id of the Cosmos-like parser.
pub const COSMOS: &str = "cosmos";

// ============================================================================
// ParseCommandError
// ============================================================================

/// Errors that can occur during parse command execution.
#[derive(Debug, thiserror::Error)]
pub enum ParseCommandError {
    /// The hex input could not be decoded.
    #[error("Invalid hex input: {0}")]
    InvalidHex(String),

    /// An `@FILE` input could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadInput {
        /// Path after the `@`.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// `--currency` names a currency the registry does not know.
    #[error("Unknown currency '{0}'. Run 'txforge currencies' to list them.")]
    UnknownCurrency(String),

    /// The parser rejected the input.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The transaction could not be rendered as JSON.
    #[error("Failed to render output: {0}")]
    Render(String),
}

// ============================================================================
// Input
// ============================================================================

/// Resolve a command-line input: `@PATH` reads the file, anything else is
/// taken literally.
///
/// # Errors
///
/// Returns [`ParseCommandError::ReadInput`] when the file cannot be read.
pub fn read_input(input: &str) -> Result<String, ParseCommandError> {
    match input.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path)).map_err(|source| {
            ParseCommandError::ReadInput {
                path: path.to_string(),
                source,
            }
        }),
        None => Ok(input.to_string()),
    }
}

// ============================================================================
// ParseCommand
// ============================================================================

/// The `txforge parse` command handler.
#[derive(Debug, Clone)]
pub struct ParseCommand {
    chain_id: &'static str,
    args: ParseArgs,
}

impl ParseCommand {
    /// `parse ethereum`.
    #[must_use]
    pub const fn ethereum(args: ParseArgs) -> Self {
        Self {
            chain_id: ETHEREUM,
            args,
        }
    }

    /// `parse cosmos`.
    #[must_use]
    pub const fn cosmos(args: ParseArgs) -> Self {
        Self {
            chain_id: COSMOS,
            args,
        }
    }

    /// Run the command and print its output.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn run(&self, currencies: &CurrencyRegistry) -> Result<(), ParseCommandError> {
        println!("{}", self.execute(currencies)?);
        Ok(())
    }

    /// Decode the input and render it in the requested format.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseCommandError`] for unreadable input, an unknown
    /// `--currency`, or a transaction the parser rejects.
    pub fn execute(&self, currencies: &CurrencyRegistry) -> Result<String, ParseCommandError> {
        let registry = self.registry(currencies)?;
        let raw = self.raw_bytes()?;

        tracing::debug!(
            chain = self.chain_id,
            bytes = raw.len(),
            signed = self.args.signed,
            "parsing raw transaction"
        );
        let parsed = registry.parse(self.chain_id, &raw, self.args.signed)?;

        match self.args.format {
            OutputFormat::Json => serde_json::to_string_pretty(&parsed)
                .map_err(|e| ParseCommandError::Render(e.to_string())),
            OutputFormat::Text => Ok(render_text(&parsed)),
        }
    }

    fn registry(&self, currencies: &CurrencyRegistry) -> Result<ChainRegistry, ParseCommandError> {
        let mut registry = ChainRegistry::new();
        if let Some(name) = &self.args.currency {
            let currency = currencies
                .get(name)
                .cloned()
                .ok_or_else(|| ParseCommandError::UnknownCurrency(name.clone()))?;
            match self.chain_id {
                ETHEREUM => registry.register(EthereumParser::with_currency(currency)),
                _ => registry.register(CosmosParser::with_currency(currency)),
            }
        }
        Ok(registry)
    }

    fn raw_bytes(&self) -> Result<Vec<u8>, ParseCommandError> {
        let input = read_input(&self.args.input)?;
        if self.chain_id == ETHEREUM {
            hex::decode(input.trim()).map_err(|e| ParseCommandError::InvalidHex(e.to_string()))
        } else {
            Ok(input.into_bytes())
        }
    }
}

// ============================================================================
// Text rendering
// ============================================================================

fn render_text(parsed: &ParsedTransaction) -> String {
    let mut out = String::new();
    line(&mut out, "family", parsed.family());
    line(&mut out, "currency", &parsed.currency().name);
    line(&mut out, "signed", if parsed.is_signed() { "yes" } else { "no" });

    match parsed {
        ParsedTransaction::Ethereum(tx) => render_ethereum(&mut out, tx),
        ParsedTransaction::Cosmos(tx) => render_cosmos(&mut out, tx),
    }
    out.truncate(out.trim_end().len());
    out
}

fn render_ethereum(out: &mut String, tx: &EthereumTransaction) {
    let currency = tx.currency();
    line(out, "nonce", &tx.nonce().to_string());
    line(out, "gas price", &amount(currency, tx.gas_price()));
    line(out, "gas limit", &tx.gas_limit().to_string());
    line(out, "to", tx.receiver().unwrap_or("(contract creation)"));
    line(out, "value", &amount(currency, tx.value()));
    line(out, "max fee", &amount(currency, &tx.max_fee()));
    line(out, "data", &hex::encode_prefixed(tx.data()));

    if let Some(signature) = tx.signature() {
        line(out, "v", &hex::encode_prefixed(&signature.v));
        line(out, "r", &hex::encode_prefixed(&signature.r));
        line(out, "s", &hex::encode_prefixed(&signature.s));
    }
    match tx.hash() {
        Ok(hash) => line(out, "hash", &hash.to_string()),
        Err(e) => tracing::warn!(error = %e, "transaction hash unavailable"),
    }
}

fn render_cosmos(out: &mut String, tx: &CosmosTransaction) {
    line(out, "memo", tx.memo());
    line(out, "account number", tx.account_number().unwrap_or("-"));
    line(out, "sequence", tx.sequence().unwrap_or("-"));
    line(
        out,
        "gas",
        &tx.gas().map_or_else(|| "-".to_string(), ToString::to_string),
    );
    line(
        out,
        "fee",
        &tx.fee()
            .map_or_else(|| "-".to_string(), |fee| amount(tx.currency(), fee)),
    );
    line(out, "messages", &tx.messages().len().to_string());
    for (index, message) in tx.messages().iter().enumerate() {
        line(out, &format!("  [{index}]"), &describe_message(message));
    }

    if let Some(signature) = tx.signature() {
        line(out, "signature", &hex::encode(signature.to_bytes()));
    }
    if let Some(pub_key) = tx.signing_pub_key() {
        line(out, "public key", &hex::encode(pub_key));
    }
}

fn describe_message(message: &CosmosMessage) -> String {
    if message.is_supported() {
        message.msg_type().to_string()
    } else {
        format!("{} (unsupported)", message.msg_type())
    }
}

/// `value` in the base unit, followed by the display unit when they differ.
fn amount(currency: &Currency, value: &BigInt) -> String {
    let (Some(base), Some(display)) = (currency.base_unit(), currency.display_unit()) else {
        return value.to_string();
    };
    if base.name == display.name {
        return format!("{value} {}", base.name);
    }
    format!(
        "{value} {} ({} {})",
        base.name,
        scale_to_display(value, display.number_of_decimals),
        display.symbol
    )
}

fn line(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "{:<16}{value}", format!("{key}:"));
}

// ============================================================================
// Tests
// ============================================================================
