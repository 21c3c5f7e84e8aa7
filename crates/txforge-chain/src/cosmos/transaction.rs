//! Cosmos-like amino JSON transactions.

use std::collections::BTreeMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use serde_json::{json, Map, Value};
use txforge_core::{BigInt, Currency};

use super::message::{coins_json, Coin, CosmosMessage};

/// Amino type of secp256k1 public keys.
pub const SECP256K1_PUB_KEY_TYPE: &str = "tendermint/PubKeySecp256k1";

/// `(r, s)` signature halves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CosmosSignature {
    /// First 32 bytes.
    #[serde(serialize_with = "crate::serde_hex::serialize")]
    pub r: Vec<u8>,
    /// Last 32 bytes.
    #[serde(serialize_with = "crate::serde_hex::serialize")]
    pub s: Vec<u8>,
}

impl CosmosSignature {
    /// The 64-byte `r || s` blob.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        [self.r.as_slice(), self.s.as_slice()].concat()
    }
}

/// How a node should acknowledge a broadcast transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BroadcastMode {
    /// Wait for the transaction to be committed.
    Block,
    /// Wait for `CheckTx`.
    #[default]
    Sync,
    /// Return immediately.
    Async,
}

impl BroadcastMode {
    /// Wire spelling of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }
}

impl fmt::Display for BroadcastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Cosmos-like transaction: memo, fee, messages and an optional signature.
///
/// `account_number` and `sequence` are only present in sign documents, so a
/// transaction parsed from a broadcast document has neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CosmosTransaction {
    #[serde(skip)]
    currency: Currency,
    memo: String,
    account_number: Option<String>,
    sequence: Option<String>,
    gas: Option<BigInt>,
    fee: Option<BigInt>,
    messages: Vec<CosmosMessage>,
    signature: Option<CosmosSignature>,
    #[serde(serialize_with = "crate::serde_hex::serialize_option")]
    signing_pub_key: Option<Vec<u8>>,
}

impl CosmosTransaction {
    /// Create an unsigned transaction. `fee` is in base units.
    #[must_use]
    pub fn new(
        currency: Currency,
        memo: String,
        account_number: Option<String>,
        sequence: Option<String>,
        gas: Option<BigInt>,
        fee: Option<BigInt>,
        messages: Vec<CosmosMessage>,
    ) -> Self {
        Self {
            currency,
            memo,
            account_number,
            sequence,
            gas,
            fee,
            messages,
            signature: None,
            signing_pub_key: None,
        }
    }

    pub(crate) fn set_signature(&mut self, signature: CosmosSignature) {
        self.signature = Some(signature);
    }

    pub(crate) fn set_signing_pub_key(&mut self, pub_key: Vec<u8>) {
        self.signing_pub_key = Some(pub_key);
    }

    /// The currency of the fee.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Memo.
    #[must_use]
    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Account number, when known.
    #[must_use]
    pub fn account_number(&self) -> Option<&str> {
        self.account_number.as_deref()
    }

    /// Account sequence, when known.
    #[must_use]
    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_deref()
    }

    /// Gas limit.
    #[must_use]
    pub const fn gas(&self) -> Option<&BigInt> {
        self.gas.as_ref()
    }

    /// Total fee in base units.
    #[must_use]
    pub const fn fee(&self) -> Option<&BigInt> {
        self.fee.as_ref()
    }

    /// Messages, in document order.
    #[must_use]
    pub fn messages(&self) -> &[CosmosMessage] {
        &self.messages
    }

    /// Attached signature, if any.
    #[must_use]
    pub const fn signature(&self) -> Option<&CosmosSignature> {
        self.signature.as_ref()
    }

    /// Public key that produced the signature, if known.
    #[must_use]
    pub fn signing_pub_key(&self) -> Option<&[u8]> {
        self.signing_pub_key.as_deref()
    }

    /// Whether a signature is attached.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// The fee as a single coin of the currency's base unit.
    #[must_use]
    pub fn fee_coin(&self) -> Option<Coin> {
        let fee = self.fee.as_ref()?;
        let unit = self.currency.base_unit()?;
        Some(Coin::new(fee.to_string(), unit.name.clone()))
    }

    /// The amino sign document for `chain_id`, with keys sorted at every
    /// level and no insignificant whitespace.
    ///
    /// Parsing the document back as an unsigned transaction yields this
    /// transaction without its signature.
    #[must_use]
    pub fn serialize_for_signature(&self, chain_id: &str) -> String {
        let mut document = Map::new();
        document.insert("chain_id".into(), chain_id.into());
        document.insert("memo".into(), self.memo.clone().into());
        document.insert("msgs".into(), self.messages_json());
        if let Some(account_number) = &self.account_number {
            document.insert("account_number".into(), account_number.clone().into());
        }
        if let Some(sequence) = &self.sequence {
            document.insert("sequence".into(), sequence.clone().into());
        }
        if let Some(fee) = self.fee_json() {
            document.insert("fee".into(), fee);
        }

        sort_keys(Value::Object(document)).to_string()
    }

    /// The `{"tx": .., "mode": ..}` body accepted by a node's broadcast
    /// endpoint.
    #[must_use]
    pub fn serialize_for_broadcast(&self, mode: BroadcastMode) -> String {
        let mut tx = Map::new();
        tx.insert("memo".into(), self.memo.clone().into());
        tx.insert("msg".into(), self.messages_json());
        if let Some(fee) = self.fee_json() {
            tx.insert("fee".into(), fee);
        }
        tx.insert(
            "signatures".into(),
            Value::Array(self.signature_json().into_iter().collect()),
        );

        json!({ "mode": mode.as_str(), "tx": Value::Object(tx) }).to_string()
    }

    fn messages_json(&self) -> Value {
        Value::Array(self.messages.iter().map(CosmosMessage::to_amino_json).collect())
    }

    /// `amount` is left out when the fee is unknown.
    fn fee_json(&self) -> Option<Value> {
        let gas = self.gas.as_ref()?;
        let mut fee = Map::new();
        if self.fee.is_some() {
            let amount: Vec<Coin> = self.fee_coin().into_iter().collect();
            fee.insert("amount".into(), coins_json(&amount));
        }
        fee.insert("gas".into(), gas.to_string().into());
        Some(Value::Object(fee))
    }

    fn signature_json(&self) -> Option<Value> {
        let signature = self.signature.as_ref()?;
        let mut entry = Map::new();
        entry.insert(
            "signature".into(),
            STANDARD.encode(signature.to_bytes()).into(),
        );
        if let Some(pub_key) = &self.signing_pub_key {
            entry.insert(
                "pub_key".into(),
                json!({ "type": SECP256K1_PUB_KEY_TYPE, "value": STANDARD.encode(pub_key) }),
            );
        }
        Some(Value::Object(entry))
    }
}

/// Rebuild every object of `value` with lexicographically ordered keys.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => {
            let sorted: BTreeMap<String, Value> = object
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
