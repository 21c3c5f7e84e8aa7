//! Accumulated parameters of a Cosmos-like transaction.

use txforge_core::BigInt;

use super::message::CosmosMessage;

/// Parameters collected by a
/// [`CosmosTransactionBuilder`](super::CosmosTransactionBuilder).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CosmosBuildRequest {
    /// Account sequence.
    pub sequence: Option<String>,
    /// Account number.
    pub account_number: Option<String>,
    /// Free-form memo.
    pub memo: Option<String>,
    /// Gas limit before adjustment.
    pub gas: Option<BigInt>,
    /// Multiplier applied to `gas`.
    pub gas_adjustment: Option<f64>,
    /// Fee in base units.
    pub fee: Option<BigInt>,
    /// Caller-chosen identifier carried through logs.
    pub correlation_id: Option<String>,
    /// Messages, in insertion order.
    pub messages: Vec<CosmosMessage>,
}
