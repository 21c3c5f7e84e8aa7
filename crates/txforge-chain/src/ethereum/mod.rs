//! Ethereum-like chain family.
//!
//! Legacy RLP transactions `[nonce, gasPrice, gasLimit, to, value, data]`,
//! optionally followed by a `(v, r, s)` signature.
//!
//! - [`EthereumTransactionBuilder`] accumulates parameters and hands them to
//!   an [`EthereumBuildFunction`], usually [`default_build_function`].
//! - [`parse_raw_unsigned_transaction`] and [`parse_raw_signed_transaction`]
//!   turn wire bytes back into an [`EthereumTransaction`].
//! - Addresses are normalized to EIP-55 with [`to_eip55`].

mod address;
mod build_fn;
mod builder;
mod explorer;
mod parser;
mod request;
mod transaction;

pub use address::{address_bytes, eip55_from_bytes, to_eip55, ADDRESS_LENGTH};
pub use build_fn::default_build_function;
pub use builder::{EthereumBuildFunction, EthereumTransactionBuilder};
pub use explorer::{EthereumExplorer, StaticExplorer};
pub use parser::{
    parse_raw_signed_transaction, parse_raw_transaction, parse_raw_unsigned_transaction,
    EthereumParser,
};
pub use request::EthereumBuildRequest;
pub use transaction::{EthereumSignature, EthereumTransaction};
