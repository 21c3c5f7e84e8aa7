//! # Build Command
//!
//! `txforge build cosmos` feeds its flags to a [`CosmosTransactionBuilder`]
//! and prints the sign document of the resulting transaction: the exact
//! bytes an external signer must sign.
//!
//! ```text
//! txforge build cosmos --chain-id cosmoshub-4 --gas 200000 --fee 5000 \
//!     --account-number 7 --sequence 3 --msg @send.json
//! ```

use tokio::runtime::{Handle, Runtime};
use tracing::Instrument;
use txforge_chain::cosmos::{default_build_function, parse_message, CosmosTransactionBuilder};
use txforge_core::error::{BuildError, ParseError};
use txforge_core::Currency;

use super::parse::{read_input, ParseCommandError};
use crate::cli::args::CosmosBuildArgs;
use crate::logging::new_correlation_id;

/// Errors that can occur during build command execution.
#[derive(Debug, thiserror::Error)]
pub enum BuildCommandError {
    /// A `--msg` could not be read.
    #[error(transparent)]
    Input(#[from] ParseCommandError),

    /// A `--msg` is not valid JSON.
    #[error("Message {index} is not valid JSON: {reason}")]
    InvalidJson {
        /// Position among the `--msg` flags.
        index: usize,
        /// JSON parser message.
        reason: String,
    },

    /// A `--msg` was rejected by the message parser.
    #[error("Message {index}: {source}")]
    Message {
        /// Position among the `--msg` flags.
        index: usize,
        /// Parser error.
        #[source]
        source: ParseError,
    },

    /// A `--msg` has a type this tool cannot build.
    #[error("Message {index} has unsupported type '{msg_type}'")]
    UnsupportedMessage {
        /// Position among the `--msg` flags.
        index: usize,
        /// The unknown discriminator.
        msg_type: String,
    },

    /// The builder or build function failed.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// The `txforge build cosmos` command handler.
#[derive(Debug, Clone)]
pub struct CosmosBuildCommand {
    args: CosmosBuildArgs,
    currency: Currency,
}

impl CosmosBuildCommand {
    /// Build transactions in `currency`.
    #[must_use]
    pub const fn new(args: CosmosBuildArgs, currency: Currency) -> Self {
        Self { args, currency }
    }

    /// Run the command on `runtime` and print the sign document.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn run(&self, runtime: &Runtime) -> Result<(), BuildCommandError> {
        println!("{}", runtime.block_on(self.execute())?);
        Ok(())
    }

    /// Build the transaction and return its sign document.
    ///
    /// Must be awaited inside a tokio runtime. Events are recorded in a
    /// `build` span carrying the correlation id, `--correlation-id` or a
    /// fresh one.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildCommandError`] for unreadable or unsupported
    /// messages, malformed amounts, or a failing build function.
    pub async fn execute(&self) -> Result<String, BuildCommandError> {
        let correlation_id = self
            .args
            .correlation_id
            .clone()
            .unwrap_or_else(new_correlation_id);
        let span = tracing::info_span!("build", chain = "cosmos", %correlation_id);
        self.build(correlation_id).instrument(span).await
    }

    async fn build(&self, correlation_id: String) -> Result<String, BuildCommandError> {
        let mut builder = CosmosTransactionBuilder::new(
            default_build_function(self.currency.clone()),
            Handle::current(),
        );
        builder
            .set_correlation_id(correlation_id)
            .set_gas(&self.args.gas)?
            .set_fee(&self.args.fee)?;
        if let Some(adjustment) = self.args.gas_adjustment {
            builder.set_gas_adjustment(adjustment);
        }
        if let Some(memo) = &self.args.memo {
            builder.set_memo(memo.as_str());
        }
        if let Some(account_number) = &self.args.account_number {
            builder.set_account_number(account_number.as_str());
        }
        if let Some(sequence) = &self.args.sequence {
            builder.set_sequence(sequence.as_str());
        }
        for (index, raw) in self.args.messages.iter().enumerate() {
            let text = read_input(raw)?;
            let value: serde_json::Value =
                serde_json::from_str(&text).map_err(|e| BuildCommandError::InvalidJson {
                    index,
                    reason: e.to_string(),
                })?;
            let message = parse_message(&value)
                .map_err(|source| BuildCommandError::Message { index, source })?;
            if !message.is_supported() {
                return Err(BuildCommandError::UnsupportedMessage {
                    index,
                    msg_type: message.msg_type().to_string(),
                });
            }
            builder.add_message(message);
        }

        let transaction = builder.build().await?;
        Ok(transaction.serialize_for_signature(&self.args.chain_id))
    }
}
