//! # txforge-chain
//!
//! Transaction builders, codecs and raw parsers for two chain families:
//!
//! - [`ethereum`] - legacy RLP transactions, EIP-55 addresses, an
//!   explorer-backed build function
//! - [`cosmos`] - amino JSON transactions and their message dispatch table
//!
//! ## Building
//!
//! Builders accumulate a request through chained setters and hand a snapshot
//! of it to an injected build function. The result is a [`BuildFuture`]; a
//! [`TransactionCallback`] can receive it instead on the builder's runtime.
//!
//! ```rust
//! use txforge_chain::cosmos::{default_build_function, CosmosMessage, CosmosTransactionBuilder};
//! use txforge_core::{BigInt, Currency};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), txforge_core::BuildError> {
//! let mut builder = CosmosTransactionBuilder::new(
//!     default_build_function(Currency::atom()),
//!     tokio::runtime::Handle::current(),
//! );
//! builder
//!     .set_memo("payout")
//!     .set_gas("200000")?
//!     .set_fee("5000")?
//!     .add_message(CosmosMessage::Unjail {
//!         validator_address: "cosmosvaloper1v".to_string(),
//!     });
//!
//! let tx = builder.build().await?;
//! assert_eq!(tx.fee(), Some(&BigInt::from(5000u64)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Parsing
//!
//! Each family exposes `parse_raw_unsigned_transaction` and
//! `parse_raw_signed_transaction`. The [`ChainRegistry`] looks parsers up by
//! chain identifier:
//!
//! ```rust
//! use txforge_chain::ChainRegistry;
//!
//! let registry = ChainRegistry::new();
//! for chain_id in registry.supported_chains() {
//!     println!("Supported: {chain_id}");
//! }
//! ```
//!
//! ## Crate Features
//!
//! - `mock` - Enable `MockChain` for use in other crates' tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod build;
pub mod chain;
pub mod cosmos;
pub mod ethereum;
pub mod registry;
pub mod rlp;
mod serde_hex;

pub use build::{deliver, BuildFuture, CallbackError, TransactionCallback};

// Re-export the Chain trait at crate root for convenience
pub use chain::{Chain, ParsedTransaction};

// Re-export chain parsers at crate root for convenience
pub use cosmos::CosmosParser;
pub use ethereum::EthereumParser;

pub use registry::ChainRegistry;

pub use rlp::RlpItem;

// Re-export MockChain and MockParseError when the mock feature is enabled or in tests
#[cfg(any(test, feature = "mock"))]
pub use chain::{MockChain, MockParseError};
