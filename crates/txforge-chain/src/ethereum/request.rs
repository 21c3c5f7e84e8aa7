//! Accumulated parameters of an Ethereum-like transaction.

use txforge_core::BigInt;

/// Parameters collected by an
/// [`EthereumTransactionBuilder`](super::EthereumTransactionBuilder).
///
/// Every field is optional until the build function runs; the build function
/// decides which ones it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EthereumBuildRequest {
    /// EIP-55 recipient address.
    pub to_address: Option<String>,
    /// Value in wei. Ignored when `wipe` is set.
    pub value: Option<BigInt>,
    /// Gas price in wei.
    pub gas_price: Option<BigInt>,
    /// Gas limit.
    pub gas_limit: Option<BigInt>,
    /// Call data.
    pub input_data: Vec<u8>,
    /// Caller-chosen identifier carried through logs.
    pub correlation_id: Option<String>,
    /// Send the whole balance minus fees.
    pub wipe: bool,
}
