//! Raw Ethereum-like transaction parsing.
//!
//! Raw transactions are the RLP list
//! `[nonce, gasPrice, gasLimit, to, value, data]` when unsigned, extended with
//! `[v, r, s]` when signed. Fields are read positionally and every field must
//! be a byte string.
//!
//! # Example
//!
//! ```
//! use alloy_primitives::hex;
//! use txforge_chain::ethereum::parse_raw_signed_transaction;
//! use txforge_core::{BigInt, Currency};
//!
//! let raw = hex::decode(
//!     "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83",
//! ).unwrap();
//!
//! let tx = parse_raw_signed_transaction(&Currency::ethereum(), &raw).unwrap();
//! assert_eq!(tx.nonce(), &BigInt::from(9u64));
//! assert_eq!(tx.receiver(), Some("0x3535353535353535353535353535353535353535"));
//! assert!(tx.is_signed());
//! ```

use txforge_core::error::ParseError;
use txforge_core::{BigInt, Currency};

use super::address::eip55_from_bytes;
use super::transaction::{EthereumSignature, EthereumTransaction, IntegerLeaves};
use crate::chain::{Chain, ParsedTransaction};
use crate::rlp;

/// Field names in wire order.
const FIELDS: [&str; 9] = [
    "nonce", "gasPrice", "gasLimit", "to", "value", "data", "v", "r", "s",
];

/// Number of fields of an unsigned transaction.
const UNSIGNED_FIELD_COUNT: usize = 6;

/// Number of fields of a signed (or EIP-155 signing payload) transaction.
const SIGNED_FIELD_COUNT: usize = 9;

/// Parse a raw transaction without reading its signature.
///
/// Both the 6-field layout and the 9-field layout are accepted; the last
/// three fields of the latter are ignored.
///
/// # Errors
///
/// See [`parse_raw_transaction`].
pub fn parse_raw_unsigned_transaction(
    currency: &Currency,
    raw: &[u8],
) -> Result<EthereumTransaction, ParseError> {
    parse_raw_transaction(currency, raw, false)
}

/// Parse a raw signed transaction and attach its `(v, r, s)` signature.
///
/// # Errors
///
/// See [`parse_raw_transaction`].
pub fn parse_raw_signed_transaction(
    currency: &Currency,
    raw: &[u8],
) -> Result<EthereumTransaction, ParseError> {
    parse_raw_transaction(currency, raw, true)
}

/// Parse a raw transaction.
///
/// # Errors
///
/// - [`ParseError::InvalidRlp`] if `raw` is not a single well-formed RLP item
/// - [`ParseError::MalformedTransaction`] if the item is not a list of byte
///   strings, has the wrong number of fields (9 when `is_signed`, 6 or 9
///   otherwise), or the receiver is neither empty nor 20 bytes
pub fn parse_raw_transaction(
    currency: &Currency,
    raw: &[u8],
    is_signed: bool,
) -> Result<EthereumTransaction, ParseError> {
    let decoded = rlp::decode(raw)?;
    let children = decoded.as_list().ok_or_else(|| {
        ParseError::malformed_transaction("expected an RLP list of transaction fields")
    })?;

    let count = children.len();
    let layout_ok = if is_signed {
        count == SIGNED_FIELD_COUNT
    } else {
        count == UNSIGNED_FIELD_COUNT || count == SIGNED_FIELD_COUNT
    };
    if !layout_ok {
        return Err(ParseError::malformed_transaction(format!(
            "expected {} fields, got {count}",
            if is_signed { "9" } else { "6 or 9" }
        )));
    }

    let leaves = children
        .iter()
        .zip(FIELDS)
        .map(|(child, name)| {
            child.as_bytes().ok_or_else(|| {
                ParseError::malformed_transaction(format!("field {name} must not be a list"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [nonce, gas_price, gas_limit, to, value, data, rest @ ..] = leaves.as_slice() else {
        return Err(ParseError::malformed_transaction("missing transaction fields"));
    };

    let receiver = if to.is_empty() {
        None
    } else {
        Some(eip55_from_bytes(to)?)
    };

    let mut transaction = EthereumTransaction::new(
        currency.clone(),
        BigInt::from_be_bytes(nonce),
        BigInt::from_be_bytes(gas_price),
        BigInt::from_be_bytes(gas_limit),
        receiver,
        BigInt::from_be_bytes(value),
        data.to_vec(),
    );
    transaction.set_wire_integers(IntegerLeaves {
        nonce: nonce.to_vec(),
        gas_price: gas_price.to_vec(),
        gas_limit: gas_limit.to_vec(),
        value: value.to_vec(),
    });

    if is_signed {
        if let [v, r, s] = rest {
            transaction.set_signature(EthereumSignature {
                v: v.to_vec(),
                r: r.to_vec(),
                s: s.to_vec(),
            });
        }
    }

    tracing::debug!(
        fields = count,
        signed = transaction.is_signed(),
        contract_creation = transaction.receiver().is_none(),
        "parsed ethereum transaction"
    );

    Ok(transaction)
}

// ============================================================================
// Chain
// ============================================================================

/// [`Chain`] implementation for RLP-encoded Ethereum-like transactions.
#[derive(Debug, Clone)]
pub struct EthereumParser {
    currency: Currency,
}

impl EthereumParser {
    /// Parser for ether.
    #[must_use]
    pub fn new() -> Self {
        Self::with_currency(Currency::ethereum())
    }

    /// Parser attaching `currency` to every parsed transaction.
    #[must_use]
    pub const fn with_currency(currency: Currency) -> Self {
        Self { currency }
    }
}

impl Default for EthereumParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain for EthereumParser {
    fn id(&self) -> &'static str {
        "ethereum"
    }

    fn currency(&self) -> &Currency {
        &self.currency
    }

    fn parse(&self, raw: &[u8], is_signed: bool) -> Result<ParsedTransaction, ParseError> {
        parse_raw_transaction(&self.currency, raw, is_signed).map(ParsedTransaction::Ethereum)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::indexing_slicing,
        clippy::unreadable_literal
    )]

    use super::*;
    use crate::rlp::{encode, RlpItem};
    use alloy_primitives::{hex, keccak256};

    /// EIP-155 example: nonce 9, 20 gwei, 21000 gas, 1 ether to 0x3535...35.
    const SIGNED: &str = "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83";

    /// The same transaction as an EIP-155 signing payload (chain id 1).
    const SIGNING_PAYLOAD: &str = "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080";

    fn fields(values: &[&[u8]]) -> Vec<RlpItem> {
        values.iter().map(|v| RlpItem::bytes(v.to_vec())).collect()
    }

    fn eth() -> Currency {
        Currency::ethereum()
    }

    #[test]
    fn test_parse_signed() {
        let raw = hex::decode(SIGNED).unwrap();
        let tx = parse_raw_signed_transaction(&eth(), &raw).unwrap();

        assert_eq!(tx.nonce(), &BigInt::from(9u64));
        assert_eq!(tx.gas_price(), &BigInt::from(20_000_000_000u64));
        assert_eq!(tx.gas_limit(), &BigInt::from(21_000u64));
        assert_eq!(
            tx.receiver(),
            Some("0x3535353535353535353535353535353535353535")
        );
        assert_eq!(tx.value(), &BigInt::from(1_000_000_000_000_000_000u64));
        assert!(tx.data().is_empty());

        let signature = tx.signature().unwrap();
        assert_eq!(signature.v, vec![0x25]);
        assert_eq!(signature.r.len(), 32);
        assert_eq!(signature.s.len(), 32);
        assert_eq!(signature.r[0], 0x28);
    }

    #[test]
    fn test_signed_round_trip_and_hash() {
        let raw = hex::decode(SIGNED).unwrap();
        let tx = parse_raw_signed_transaction(&eth(), &raw).unwrap();

        assert_eq!(tx.serialize().unwrap(), raw);
        assert_eq!(tx.hash().unwrap(), keccak256(&raw));
    }

    #[test]
    fn test_parse_unsigned_ignores_signature_fields() {
        let raw = hex::decode(SIGNED).unwrap();
        let tx = parse_raw_unsigned_transaction(&eth(), &raw).unwrap();

        assert!(tx.signature().is_none());
        assert_eq!(tx.nonce(), &BigInt::from(9u64));
    }

    #[test]
    fn test_parse_signing_payload_as_unsigned() {
        let raw = hex::decode(SIGNING_PAYLOAD).unwrap();
        let tx = parse_raw_unsigned_transaction(&eth(), &raw).unwrap();

        assert!(!tx.is_signed());
        assert_eq!(tx.value(), &BigInt::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_parse_six_fields() {
        let raw = encode(&RlpItem::List(fields(&[
            &[0x01],
            &[0x0a],
            &[0x52, 0x08],
            &[0x11; 20],
            &[0x03, 0xe8],
            &[0xde, 0xad],
        ])));

        let tx = parse_raw_unsigned_transaction(&eth(), &raw).unwrap();
        assert_eq!(tx.value(), &BigInt::from(1000u64));
        assert_eq!(tx.data(), &[0xde, 0xad]);
        assert_eq!(tx.serialize().unwrap(), raw);

        assert!(matches!(
            parse_raw_signed_transaction(&eth(), &raw),
            Err(ParseError::MalformedTransaction { .. })
        ));
    }

    #[test]
    fn test_parse_contract_creation() {
        let raw = encode(&RlpItem::List(fields(&[
            &[],
            &[0x01],
            &[0x01, 0x86, 0xa0],
            &[],
            &[],
            &[0x60, 0x80, 0x60, 0x40],
        ])));

        let tx = parse_raw_unsigned_transaction(&eth(), &raw).unwrap();
        assert!(tx.receiver().is_none());
        assert!(tx.nonce().is_zero());
        assert!(tx.value().is_zero());
    }

    #[test]
    fn test_parse_zero_value_byte() {
        let raw = encode(&RlpItem::List(fields(&[
            &[0x01],
            &[0x02],
            &[0x52, 0x08],
            &[0x11; 20],
            &[0x00],
            &[],
        ])));

        let tx = parse_raw_unsigned_transaction(&eth(), &raw).unwrap();
        assert_eq!(tx.nonce(), &BigInt::from(1u64));
        assert_eq!(tx.gas_price(), &BigInt::from(2u64));
        assert_eq!(tx.gas_limit(), &BigInt::from(21_000u64));
        assert!(tx.value().is_zero());
        assert!(tx.data().is_empty());
        assert!(tx.signature().is_none());
        assert_eq!(tx.serialize().unwrap(), raw);
    }

    #[test]
    fn test_non_minimal_integers_survive_round_trip() {
        let raw = encode(&RlpItem::List(fields(&[
            &[0x00, 0x01],
            &[0x00, 0x00, 0x0a],
            &[0x52, 0x08],
            &[0x11; 20],
            &[0x00, 0x03, 0xe8],
            &[0xde, 0xad],
        ])));

        let tx = parse_raw_unsigned_transaction(&eth(), &raw).unwrap();
        assert_eq!(tx.nonce(), &BigInt::from(1u64));
        assert_eq!(tx.gas_price(), &BigInt::from(10u64));
        assert_eq!(tx.value(), &BigInt::from(1000u64));
        assert_eq!(tx.serialize().unwrap(), raw);

        let again = parse_raw_unsigned_transaction(&eth(), &tx.serialize().unwrap()).unwrap();
        assert_eq!(again, tx);
    }

    #[test]
    fn test_canonical_parse_equals_built() {
        let raw = encode(&RlpItem::List(fields(&[
            &[0x01],
            &[0x0a],
            &[0x52, 0x08],
            &[0x11; 20],
            &[0x03, 0xe8],
            &[],
        ])));

        let parsed = parse_raw_unsigned_transaction(&eth(), &raw).unwrap();
        let built = EthereumTransaction::new(
            eth(),
            BigInt::from(1u64),
            BigInt::from(10u64),
            BigInt::from(21_000u64),
            parsed.receiver().map(str::to_owned),
            BigInt::from(1000u64),
            Vec::new(),
        );
        assert_eq!(parsed, built);
        assert_eq!(built.serialize().unwrap(), raw);
    }

    #[test]
    fn test_parse_rejects_list_field() {
        let mut items = fields(&[&[0x01], &[0x01], &[0x01], &[0x11; 20], &[0x01]]);
        items.push(RlpItem::List(vec![]));
        let raw = encode(&RlpItem::List(items));

        assert!(matches!(
            parse_raw_unsigned_transaction(&eth(), &raw),
            Err(ParseError::MalformedTransaction { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        let raw = encode(&RlpItem::List(fields(&[&[0x01], &[0x01], &[0x01]])));
        assert!(matches!(
            parse_raw_unsigned_transaction(&eth(), &raw),
            Err(ParseError::MalformedTransaction { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_receiver_length() {
        let raw = encode(&RlpItem::List(fields(&[
            &[0x01],
            &[0x01],
            &[0x01],
            &[0x11; 19],
            &[0x01],
            &[],
        ])));
        assert!(matches!(
            parse_raw_unsigned_transaction(&eth(), &raw),
            Err(ParseError::MalformedTransaction { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_list_and_bad_rlp() {
        assert!(matches!(
            parse_raw_unsigned_transaction(&eth(), &[0x83, 0x01, 0x02, 0x03]),
            Err(ParseError::MalformedTransaction { .. })
        ));
        assert!(matches!(
            parse_raw_unsigned_transaction(&eth(), &[0xf8, 0xff]),
            Err(ParseError::InvalidRlp { .. })
        ));
        assert!(matches!(
            parse_raw_unsigned_transaction(&eth(), &[]),
            Err(ParseError::InvalidRlp { .. })
        ));
    }

    #[test]
    fn test_chain_impl() {
        let parser = EthereumParser::new();
        assert_eq!(parser.id(), "ethereum");
        assert_eq!(parser.currency().name, "ethereum");

        let raw = hex::decode(SIGNED).unwrap();
        let parsed = parser.parse(&raw, true).unwrap();
        assert!(matches!(parsed, ParsedTransaction::Ethereum(ref tx) if tx.is_signed()));
    }
}
