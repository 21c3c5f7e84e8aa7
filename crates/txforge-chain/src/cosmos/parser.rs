//! Raw Cosmos-like transaction parsing.
//!
//! Two document shapes are accepted:
//!
//! - the sign document, with `account_number`, `sequence` and the messages
//!   under `msgs`;
//! - the broadcast transaction, with the messages under `msg` and an
//!   optional `signatures` array.
//!
//! # Example
//!
//! ```
//! use txforge_chain::cosmos::parse_raw_unsigned_transaction;
//! use txforge_core::{BigInt, Currency};
//!
//! let raw = r#"{
//!     "account_number": "6571",
//!     "chain_id": "cosmoshub-3",
//!     "fee": {"amount": [{"amount": "5000", "denom": "uatom"}], "gas": "200000"},
//!     "memo": "Sent from Ledger",
//!     "msgs": [{
//!         "type": "cosmos-sdk/MsgSend",
//!         "value": {
//!             "amount": [{"amount": "1000000", "denom": "uatom"}],
//!             "from_address": "cosmos1from",
//!             "to_address": "cosmos1to"
//!         }
//!     }],
//!     "sequence": "0"
//! }"#;
//!
//! let tx = parse_raw_unsigned_transaction(&Currency::atom(), raw).unwrap();
//! assert_eq!(tx.memo(), "Sent from Ledger");
//! assert_eq!(tx.fee(), Some(&BigInt::from(5000u64)));
//! assert_eq!(tx.messages().len(), 1);
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use txforge_core::error::ParseError;
use txforge_core::{scale_to_base, BigInt, Currency};

use super::parsers::{get_optional_string, get_string, parse_message, JsonObject};
use super::transaction::{CosmosSignature, CosmosTransaction};
use crate::chain::{Chain, ParsedTransaction};

/// Length of an `r || s` signature blob.
pub const SIGNATURE_LENGTH: usize = 64;

/// Parse a sign document or an unsigned broadcast transaction.
///
/// # Errors
///
/// See [`parse_raw_transaction`].
pub fn parse_raw_unsigned_transaction(
    currency: &Currency,
    raw: &str,
) -> Result<CosmosTransaction, ParseError> {
    parse_raw_transaction(currency, raw, false)
}

/// Parse a broadcast transaction and attach its first signature.
///
/// # Errors
///
/// See [`parse_raw_transaction`].
pub fn parse_raw_signed_transaction(
    currency: &Currency,
    raw: &str,
) -> Result<CosmosTransaction, ParseError> {
    parse_raw_transaction(currency, raw, true)
}

/// Parse a raw JSON transaction.
///
/// # Errors
///
/// - [`ParseError::InvalidArgument`] if `raw` is not a JSON object, `memo` is
///   missing, a present field has the wrong type, or a message is invalid
/// - [`ParseError::UnknownDenomination`] if a fee coin is not denominated in
///   a unit of `currency`
/// - [`ParseError::Amount`] if a fee amount or the gas is not a number
/// - [`ParseError::MalformedSignature`] if `is_signed` and the first
///   signature is not base64 of exactly 64 bytes
pub fn parse_raw_transaction(
    currency: &Currency,
    raw: &str,
    is_signed: bool,
) -> Result<CosmosTransaction, ParseError> {
    let document: Value = serde_json::from_str(raw)
        .map_err(|e| ParseError::invalid_argument(format!("transaction is not valid JSON: {e}")))?;
    let document = document
        .as_object()
        .ok_or_else(|| ParseError::invalid_argument("transaction must be a JSON object"))?;

    let memo = get_string(document, "memo")?;
    let account_number = present_string(document, "account_number")?;
    let sequence = present_string(document, "sequence")?;

    let (gas, fee) = match document.get("fee").and_then(Value::as_object) {
        Some(fee) => {
            let (gas, total) = parse_fee(currency, fee)?;
            (Some(gas), total)
        }
        None => (None, None),
    };

    let messages = match document.get("msg").or_else(|| document.get("msgs")) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter(|entry| {
                let keep = entry.is_object();
                if !keep {
                    tracing::warn!("skipping non-object message entry");
                }
                keep
            })
            .map(parse_message)
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(ParseError::invalid_argument("messages must be an array")),
        None => Vec::new(),
    };

    let mut transaction = CosmosTransaction::new(
        currency.clone(),
        memo,
        account_number,
        sequence,
        gas,
        fee,
        messages,
    );

    if is_signed {
        attach_first_signature(&mut transaction, document)?;
    }

    tracing::debug!(
        messages = transaction.messages().len(),
        signed = transaction.is_signed(),
        has_fee = transaction.fee().is_some(),
        "parsed cosmos transaction"
    );

    Ok(transaction)
}

/// A string field that is optional but must be a string when present.
fn present_string(object: &JsonObject, field: &str) -> Result<Option<String>, ParseError> {
    if object.contains_key(field) {
        get_string(object, field).map(Some)
    } else {
        Ok(None)
    }
}

/// Gas limit and total fee, in base units, of a `fee` object.
///
/// The total is `None` when the object has no `amount` array.
fn parse_fee(
    currency: &Currency,
    fee: &JsonObject,
) -> Result<(BigInt, Option<BigInt>), ParseError> {
    let gas = BigInt::from_decimal_str(&get_string(fee, "gas")?)?;

    let Some(coins) = fee.get("amount").and_then(Value::as_array) else {
        return Ok((gas, None));
    };

    let mut total = BigInt::zero();
    for coin in coins {
        let Some(coin) = coin.as_object() else {
            tracing::warn!("skipping non-object fee entry");
            continue;
        };
        let amount = get_string(coin, "amount")?;
        let denom = get_string(coin, "denom")?;
        let unit = currency
            .unit(&denom)
            .ok_or_else(|| ParseError::unknown_denomination(&denom, &currency.name))?;
        total = total + scale_to_base(&amount, unit.number_of_decimals)?;
    }

    Ok((gas, Some(total)))
}

fn attach_first_signature(
    transaction: &mut CosmosTransaction,
    document: &JsonObject,
) -> Result<(), ParseError> {
    let Some(first) = document
        .get("signatures")
        .and_then(Value::as_array)
        .and_then(|signatures| signatures.first())
    else {
        return Ok(());
    };
    let first = first
        .as_object()
        .ok_or_else(|| ParseError::malformed_signature("signature entry must be an object"))?;

    let blob = decode_base64(&get_string(first, "signature")?)?;
    if blob.len() != SIGNATURE_LENGTH {
        return Err(ParseError::malformed_signature(format!(
            "expected {SIGNATURE_LENGTH} bytes, got {}",
            blob.len()
        )));
    }
    let (r, s) = blob.split_at(SIGNATURE_LENGTH / 2);
    transaction.set_signature(CosmosSignature {
        r: r.to_vec(),
        s: s.to_vec(),
    });

    if let Some(pub_key) = first
        .get("pub_key")
        .and_then(Value::as_object)
        .and_then(|pub_key| get_optional_string(pub_key, "value"))
    {
        transaction.set_signing_pub_key(decode_base64(&pub_key)?);
    }

    Ok(())
}

fn decode_base64(encoded: &str) -> Result<Vec<u8>, ParseError> {
    STANDARD
        .decode(encoded)
        .map_err(|e| ParseError::malformed_signature(format!("invalid base64: {e}")))
}

// ============================================================================
// Chain
// ============================================================================

/// [`Chain`] implementation for amino JSON Cosmos-like transactions.
#[derive(Debug, Clone)]
pub struct CosmosParser {
    currency: Currency,
}

impl CosmosParser {
    /// Parser for atom.
    #[must_use]
    pub fn new() -> Self {
        Self::with_currency(Currency::atom())
    }

    /// Parser resolving fee denominations against `currency`.
    #[must_use]
    pub const fn with_currency(currency: Currency) -> Self {
        Self { currency }
    }
}

impl Default for CosmosParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain for CosmosParser {
    fn id(&self) -> &'static str {
        "cosmos"
    }

    fn currency(&self) -> &Currency {
        &self.currency
    }

    fn parse(&self, raw: &[u8], is_signed: bool) -> Result<ParsedTransaction, ParseError> {
        let raw = std::str::from_utf8(raw)
            .map_err(|e| ParseError::invalid_argument(format!("transaction is not UTF-8: {e}")))?;
        parse_raw_transaction(&self.currency, raw, is_signed).map(ParsedTransaction::Cosmos)
    }
}

// ============================================================================
// Tests
// ============================================================================
