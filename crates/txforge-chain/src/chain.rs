//! Chain trait for raw transaction parsers.
//!
//! A [`Chain`] turns the wire form of one chain family into a
//! [`ParsedTransaction`]. Implementations are registered in a
//! [`ChainRegistry`](crate::ChainRegistry) so callers can pick a parser by
//! identifier at runtime.
//!
//! # Wire forms
//!
//! ## Ethereum
//! - Legacy RLP list of 6 fields (unsigned) or 9 fields (signed or EIP-155
//!   signing payload)
//!
//! ## Cosmos
//! - UTF-8 amino JSON: a sign document (`msgs`) or a broadcast transaction
//!   (`msg`, `signatures`)
//!
//! # Example Implementation
//!
//! ```
//! use txforge_chain::{Chain, ParsedTransaction};
//! use txforge_chain::ethereum::parse_raw_transaction;
//! use txforge_core::{error::ParseError, Currency};
//!
//! struct MainnetEther {
//!     currency: Currency,
//! }
//!
//! impl Chain for MainnetEther {
//!     fn id(&self) -> &'static str {
//!         "ether-mainnet"
//!     }
//!
//!     fn currency(&self) -> &Currency {
//!         &self.currency
//!     }
//!
//!     fn parse(&self, raw: &[u8], is_signed: bool) -> Result<ParsedTransaction, ParseError> {
//!         parse_raw_transaction(&self.currency, raw, is_signed).map(ParsedTransaction::Ethereum)
//!     }
//! }
//! ```

use serde::Serialize;
use txforge_core::{error::ParseError, Currency};

use crate::cosmos::CosmosTransaction;
use crate::ethereum::EthereumTransaction;

/// A transaction produced by a [`Chain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family", content = "transaction", rename_all = "lowercase")]
pub enum ParsedTransaction {
    /// RLP-encoded Ethereum-like transaction.
    Ethereum(EthereumTransaction),
    /// Amino JSON Cosmos-like transaction.
    Cosmos(CosmosTransaction),
}

impl ParsedTransaction {
    /// Name of the chain family.
    #[must_use]
    pub const fn family(&self) -> &'static str {
        match self {
            Self::Ethereum(_) => "ethereum",
            Self::Cosmos(_) => "cosmos",
        }
    }

    /// Whether a signature was found and attached.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        match self {
            Self::Ethereum(tx) => tx.is_signed(),
            Self::Cosmos(tx) => tx.is_signed(),
        }
    }

    /// Currency the transaction was parsed against.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        match self {
            Self::Ethereum(tx) => tx.currency(),
            Self::Cosmos(tx) => tx.currency(),
        }
    }

    /// The Ethereum-like transaction, if that is the family.
    #[must_use]
    pub const fn as_ethereum(&self) -> Option<&EthereumTransaction> {
        match self {
            Self::Ethereum(tx) => Some(tx),
            Self::Cosmos(_) => None,
        }
    }

    /// The Cosmos-like transaction, if that is the family.
    #[must_use]
    pub const fn as_cosmos(&self) -> Option<&CosmosTransaction> {
        match self {
            Self::Cosmos(tx) => Some(tx),
            Self::Ethereum(_) => None,
        }
    }
}

/// Trait for raw transaction parsers.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a registry can be shared across
/// tasks. The built-in parsers hold only an immutable [`Currency`].
pub trait Chain: Send + Sync {
    /// Returns the chain identifier (e.g. `"ethereum"`, `"cosmos"`).
    ///
    /// Identifiers are lowercase and used as registry keys.
    fn id(&self) -> &'static str;

    /// The currency attached to every parsed transaction.
    fn currency(&self) -> &Currency;

    /// Parse raw transaction bytes.
    ///
    /// When `is_signed` is set the parser reads and attaches the signature;
    /// otherwise any signature in the input is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing why the input was rejected. No
    /// partial transaction is returned on error.
    fn parse(&self, raw: &[u8], is_signed: bool) -> Result<ParsedTransaction, ParseError>;
}

// ============================================================================
// Mock Implementation for Testing
// ============================================================================

/// Error kinds a [`MockChain`] can be configured to return.
///
/// `ParseError` is not `Clone`, so mocks store one of these instead.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockParseError {
    /// Invalid argument.
    InvalidArgument,
    /// Malformed transaction.
    MalformedTransaction,
    /// Malformed signature.
    MalformedSignature,
}

#[cfg(any(test, feature = "mock"))]
impl MockParseError {
    /// Convert to a real `ParseError`.
    #[must_use]
    pub fn to_parse_error(self, context: &str) -> ParseError {
        match self {
            Self::InvalidArgument => ParseError::invalid_argument(context),
            Self::MalformedTransaction => ParseError::malformed_transaction(context),
            Self::MalformedSignature => ParseError::malformed_signature(context),
        }
    }
}

/// A chain returning a configured result, for tests.
///
/// # Example
///
/// ```ignore
/// use txforge_chain::{Chain, MockChain, MockParseError};
/// use txforge_core::error::ParseError;
///
/// let mock = MockChain::failing("broken", MockParseError::MalformedTransaction);
/// assert!(matches!(
///     mock.parse(&[0x01], false),
///     Err(ParseError::MalformedTransaction { .. })
/// ));
/// ```
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone)]
pub struct MockChain {
    /// The chain identifier to return from `id()`.
    pub id: &'static str,

    /// The currency to return from `currency()`.
    pub currency: Currency,

    /// The parse result to return (if `parse_error` is `None`).
    pub parse_result: Option<ParsedTransaction>,

    /// The parse error to return (takes precedence over `parse_result`).
    pub parse_error: Option<MockParseError>,
}

#[cfg(any(test, feature = "mock"))]
impl MockChain {
    /// A mock whose every parse succeeds with `result`.
    #[must_use]
    pub fn returning(id: &'static str, result: ParsedTransaction) -> Self {
        Self {
            id,
            currency: result.currency().clone(),
            parse_result: Some(result),
            parse_error: None,
        }
    }

    /// A mock whose every parse fails with `error`.
    #[must_use]
    pub fn failing(id: &'static str, error: MockParseError) -> Self {
        Self {
            id,
            currency: Currency::ethereum(),
            parse_result: None,
            parse_error: Some(error),
        }
    }
}

#[cfg(any(test, feature = "mock"))]
impl Chain for MockChain {
    fn id(&self) -> &'static str {
        self.id
    }

    fn currency(&self) -> &Currency {
        &self.currency
    }

    fn parse(&self, _raw: &[u8], _is_signed: bool) -> Result<ParsedTransaction, ParseError> {
        if let Some(error) = self.parse_error {
            return Err(error.to_parse_error("mock error"));
        }
        self.parse_result
            .clone()
            .ok_or_else(|| ParseError::malformed_transaction("no mock result configured"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use crate::cosmos::CosmosParser;
    use crate::ethereum::EthereumParser;
    use std::sync::Arc;

    #[test]
    fn test_chain_is_object_safe() {
        let chains: Vec<Box<dyn Chain>> = vec![
            Box::new(EthereumParser::new()),
            Box::new(CosmosParser::new()),
        ];
        let ids: Vec<_> = chains.iter().map(|chain| chain.id()).collect();
        assert_eq!(ids, ["ethereum", "cosmos"]);
    }

    #[test]
    fn test_chain_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Chain>();
        assert_send_sync::<Arc<dyn Chain>>();
    }

    #[test]
    fn test_parsed_transaction_accessors() {
        let parsed = CosmosParser::new()
            .parse(br#"{"memo": "", "msgs": []}"#, true)
            .unwrap();
        assert_eq!(parsed.family(), "cosmos");
        assert!(!parsed.is_signed());
        assert_eq!(parsed.currency().name, "atom");
        assert!(parsed.as_cosmos().is_some());
        assert!(parsed.as_ethereum().is_none());

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["family"], "cosmos");
        assert_eq!(json["transaction"]["memo"], "");
    }

    #[test]
    fn test_mock_chain() {
        let parsed = CosmosParser::new()
            .parse(br#"{"memo": "m"}"#, false)
            .unwrap();
        let ok = MockChain::returning("ok", parsed.clone());
        assert_eq!(ok.parse(&[], false).unwrap(), parsed);
        assert_eq!(ok.currency().name, "atom");

        let failing = MockChain::failing("bad", MockParseError::InvalidArgument);
        assert!(matches!(
            failing.parse(&[], true),
            Err(ParseError::InvalidArgument { .. })
        ));

        let empty = MockChain {
            parse_result: None,
            parse_error: None,
            ..failing
        };
        assert!(empty.parse(&[], false).is_err());
    }
}
