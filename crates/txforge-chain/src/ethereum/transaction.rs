//! Ethereum-like legacy transactions.

use alloy_primitives::{keccak256, B256};
use serde::Serialize;
use txforge_core::error::ParseError;
use txforge_core::{BigInt, Currency};

use super::address::address_bytes;
use crate::rlp::{encode, RlpItem};

/// `(v, r, s)` signature components, as raw big-endian bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EthereumSignature {
    /// Recovery id, possibly EIP-155 adjusted.
    #[serde(serialize_with = "crate::serde_hex::serialize")]
    pub v: Vec<u8>,
    /// Signature `r`.
    #[serde(serialize_with = "crate::serde_hex::serialize")]
    pub r: Vec<u8>,
    /// Signature `s`.
    #[serde(serialize_with = "crate::serde_hex::serialize")]
    pub s: Vec<u8>,
}

/// Integer leaves exactly as they appeared on the wire.
///
/// Only kept when at least one of them is not minimally encoded (`0x00`,
/// leading zeros), so that [`EthereumTransaction::serialize`] reproduces
/// the parsed bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IntegerLeaves {
    pub(crate) nonce: Vec<u8>,
    pub(crate) gas_price: Vec<u8>,
    pub(crate) gas_limit: Vec<u8>,
    pub(crate) value: Vec<u8>,
}

impl IntegerLeaves {
    /// Whether every leaf is the minimal encoding of its value.
    pub(crate) fn is_canonical(&self) -> bool {
        [&self.nonce, &self.gas_price, &self.gas_limit, &self.value]
            .into_iter()
            .all(|leaf| BigInt::from_be_bytes(leaf).to_be_bytes() == *leaf)
    }
}

/// A legacy `[nonce, gasPrice, gasLimit, to, value, data (, v, r, s)]`
/// transaction.
///
/// Instances come out of the raw parser or a build function and are not
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EthereumTransaction {
    #[serde(skip)]
    currency: Currency,
    nonce: BigInt,
    gas_price: BigInt,
    gas_limit: BigInt,
    receiver: Option<String>,
    value: BigInt,
    #[serde(serialize_with = "crate::serde_hex::serialize")]
    data: Vec<u8>,
    signature: Option<EthereumSignature>,
    #[serde(skip)]
    wire_integers: Option<IntegerLeaves>,
}

impl EthereumTransaction {
    /// Create an unsigned transaction. `receiver` must already be EIP-55
    /// encoded; `None` creates a contract.
    #[must_use]
    pub fn new(
        currency: Currency,
        nonce: BigInt,
        gas_price: BigInt,
        gas_limit: BigInt,
        receiver: Option<String>,
        value: BigInt,
        data: Vec<u8>,
    ) -> Self {
        Self {
            currency,
            nonce,
            gas_price,
            gas_limit,
            receiver,
            value,
            data,
            signature: None,
            wire_integers: None,
        }
    }

    pub(crate) fn set_signature(&mut self, signature: EthereumSignature) {
        self.signature = Some(signature);
    }

    /// Keep non-minimal integer encodings for re-serialization.
    pub(crate) fn set_wire_integers(&mut self, leaves: IntegerLeaves) {
        if !leaves.is_canonical() {
            self.wire_integers = Some(leaves);
        }
    }

    /// The currency this transaction moves.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Account nonce.
    #[must_use]
    pub const fn nonce(&self) -> &BigInt {
        &self.nonce
    }

    /// Gas price in wei.
    #[must_use]
    pub const fn gas_price(&self) -> &BigInt {
        &self.gas_price
    }

    /// Gas limit.
    #[must_use]
    pub const fn gas_limit(&self) -> &BigInt {
        &self.gas_limit
    }

    /// EIP-55 receiver, or `None` for contract creation.
    #[must_use]
    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }

    /// Value in wei.
    #[must_use]
    pub const fn value(&self) -> &BigInt {
        &self.value
    }

    /// Call data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Attached signature, if any.
    #[must_use]
    pub const fn signature(&self) -> Option<&EthereumSignature> {
        self.signature.as_ref()
    }

    /// Whether a signature is attached.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Maximum fee, `gas_price * gas_limit`.
    #[must_use]
    pub fn max_fee(&self) -> BigInt {
        &self.gas_price * &self.gas_limit
    }

    /// The transaction as an RLP list: six fields, or nine with a signature.
    ///
    /// A parsed transaction keeps the integer encodings it was read with.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidAddress`] if the receiver is not a valid
    /// hex address.
    pub fn to_rlp(&self) -> Result<RlpItem, ParseError> {
        let receiver = match &self.receiver {
            Some(address) => address_bytes(address)?.to_vec(),
            None => Vec::new(),
        };

        let (nonce, gas_price, gas_limit, value) = match &self.wire_integers {
            Some(leaves) => (
                RlpItem::bytes(leaves.nonce.clone()),
                RlpItem::bytes(leaves.gas_price.clone()),
                RlpItem::bytes(leaves.gas_limit.clone()),
                RlpItem::bytes(leaves.value.clone()),
            ),
            None => (
                RlpItem::uint(&self.nonce),
                RlpItem::uint(&self.gas_price),
                RlpItem::uint(&self.gas_limit),
                RlpItem::uint(&self.value),
            ),
        };

        let mut fields = vec![
            nonce,
            gas_price,
            gas_limit,
            RlpItem::Bytes(receiver),
            value,
            RlpItem::Bytes(self.data.clone()),
        ];
        if let Some(signature) = &self.signature {
            fields.push(RlpItem::Bytes(signature.v.clone()));
            fields.push(RlpItem::Bytes(signature.r.clone()));
            fields.push(RlpItem::Bytes(signature.s.clone()));
        }

        Ok(RlpItem::List(fields))
    }

    /// RLP wire bytes.
    ///
    /// # Errors
    ///
    /// See [`to_rlp`](Self::to_rlp).
    pub fn serialize(&self) -> Result<Vec<u8>, ParseError> {
        Ok(encode(&self.to_rlp()?))
    }

    /// Keccak-256 of [`serialize`](Self::serialize). For a signed
    /// transaction this is the transaction hash.
    ///
    /// # Errors
    ///
    /// See [`to_rlp`](Self::to_rlp).
    pub fn hash(&self) -> Result<B256, ParseError> {
        Ok(keccak256(self.serialize()?))
    }
}
