//! Cosmos-like chain family.
//!
//! Amino JSON transactions: a memo, a fee, an ordered list of
//! [`CosmosMessage`]s and, once signed, a 64-byte `r || s` signature.
//!
//! - [`CosmosTransactionBuilder`] accumulates parameters and hands them to a
//!   [`CosmosBuildFunction`], usually [`default_build_function`].
//! - [`parse_raw_unsigned_transaction`] and [`parse_raw_signed_transaction`]
//!   read sign documents and broadcast transactions.
//! - [`parse_message`] dispatches a single message on its discriminator.

mod build_fn;
mod builder;
mod message;
mod parser;
mod parsers;
mod request;
mod transaction;

pub use build_fn::default_build_function;
pub use builder::{CosmosBuildFunction, CosmosTransactionBuilder};
pub use message::{
    msg_type, Coin, CosmosMessage, MultiSendInput, MultiSendOutput, ProposalContent,
    ValidatorCommission, ValidatorDescription, VoteOption,
};
pub use parser::{
    parse_raw_signed_transaction, parse_raw_transaction, parse_raw_unsigned_transaction,
    CosmosParser, SIGNATURE_LENGTH,
};
pub use parsers::{
    get_optional_string, get_string, known_message_types, message_parser, parse_coin,
    parse_message, JsonObject, MessageParser,
};
pub use request::CosmosBuildRequest;
pub use transaction::{
    BroadcastMode, CosmosSignature, CosmosTransaction, SECP256K1_PUB_KEY_TYPE,
};
