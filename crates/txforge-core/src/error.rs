//! Error types for `TxForge`.
//!
//! Errors are organized by domain:
//!
//! - [`ParseError`] - Raw transaction, RLP and JSON message parsing failures
//! - [`AmountError`] - Number and amount scaling failures
//! - [`BuildError`] - Transaction builder failures (delivered asynchronously)
//! - [`ConfigError`] - Configuration failures
//! - [`TxForgeError`] - Top-level error that wraps all error types
//!
//! Every error maps to a stable [`ErrorCode`], which is what asynchronous
//! callback sinks receive alongside the human-readable message.
//!
//! # Example
//!
//! ```rust
//! use txforge_core::error::{ErrorCode, ParseError, TxForgeError};
//!
//! fn check(raw: &[u8]) -> Result<(), TxForgeError> {
//!     if raw.is_empty() {
//!         return Err(ParseError::invalid_rlp("empty buffer").into());
//!     }
//!     Ok(())
//! }
//!
//! let err = check(&[]).unwrap_err();
//! assert_eq!(ErrorCode::from(&err), ErrorCode::InvalidEncoding);
//! ```

use std::fmt;

/// Top-level error type for `TxForge`.
#[derive(Debug, thiserror::Error)]
pub enum TxForgeError {
    /// Raw transaction parsing failed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Transaction building failed.
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Amount arithmetic or scaling failed.
    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// ============================================================================
// ErrorCode
// ============================================================================

/// Stable numeric error codes.
///
/// These are carried by asynchronous callback errors so that callers outside
/// of Rust can branch on the failure kind without matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// A required JSON key is missing or has the wrong type.
    InvalidArgument = 1,
    /// The RLP buffer is truncated or has an invalid length prefix.
    InvalidEncoding = 2,
    /// The decoded transaction does not have the expected layout.
    MalformedTransaction = 3,
    /// The signature blob has the wrong length or encoding.
    MalformedSignature = 4,
    /// A decimal amount could not be parsed.
    InvalidAmount = 5,
    /// A coin denomination is not a unit of the currency.
    UnknownDenomination = 6,
    /// An address could not be parsed or encoded.
    InvalidAddress = 7,
    /// The requested chain is not registered.
    UnsupportedChain = 8,
    /// The account cannot cover the requested amount and fees.
    InsufficientFunds = 9,
    /// The explorer collaborator failed.
    ExplorerFailed = 10,
    /// The build was cancelled before it settled.
    Cancelled = 11,
    /// Configuration could not be loaded or is invalid.
    ConfigurationFailed = 12,
}

impl ErrorCode {
    /// Get the numeric error code value.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Get a human-readable message for this error code.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidArgument => "Invalid argument",
            Self::InvalidEncoding => "Invalid encoding",
            Self::MalformedTransaction => "Malformed transaction",
            Self::MalformedSignature => "Malformed signature",
            Self::InvalidAmount => "Invalid amount",
            Self::UnknownDenomination => "Unknown denomination",
            Self::InvalidAddress => "Invalid address",
            Self::UnsupportedChain => "Unsupported chain",
            Self::InsufficientFunds => "Insufficient funds",
            Self::ExplorerFailed => "Explorer failed",
            Self::Cancelled => "Cancelled",
            Self::ConfigurationFailed => "Configuration failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl From<&ParseError> for ErrorCode {
    fn from(error: &ParseError) -> Self {
        match error {
            ParseError::InvalidArgument { .. } => Self::InvalidArgument,
            ParseError::InvalidRlp { .. } => Self::InvalidEncoding,
            ParseError::MalformedTransaction { .. } => Self::MalformedTransaction,
            ParseError::MalformedSignature { .. } => Self::MalformedSignature,
            ParseError::UnknownDenomination { .. } => Self::UnknownDenomination,
            ParseError::UnsupportedChain { .. } => Self::UnsupportedChain,
            ParseError::InvalidAddress { .. } => Self::InvalidAddress,
            ParseError::Amount(_) => Self::InvalidAmount,
        }
    }
}

impl From<&BuildError> for ErrorCode {
    fn from(error: &BuildError) -> Self {
        match error {
            BuildError::InvalidAmount { .. } => Self::InvalidAmount,
            BuildError::MissingField { .. } => Self::InvalidArgument,
            BuildError::InvalidAddress { .. } => Self::InvalidAddress,
            BuildError::InsufficientFunds { .. } => Self::InsufficientFunds,
            BuildError::Explorer { .. } => Self::ExplorerFailed,
            BuildError::Cancelled => Self::Cancelled,
            BuildError::Parse(inner) => Self::from(inner),
        }
    }
}

impl From<&TxForgeError> for ErrorCode {
    fn from(error: &TxForgeError) -> Self {
        match error {
            TxForgeError::Parse(inner) => Self::from(inner),
            TxForgeError::Build(inner) => Self::from(inner),
            TxForgeError::Amount(_) => Self::InvalidAmount,
            TxForgeError::Config(_) => Self::ConfigurationFailed,
        }
    }
}

impl From<TxForgeError> for ErrorCode {
    fn from(error: TxForgeError) -> Self {
        Self::from(&error)
    }
}

// ============================================================================
// ParseError
// ============================================================================

/// Errors that can occur while parsing raw transactions.
///
/// Parsing is all-or-nothing: callers never receive a partially populated
/// transaction together with one of these errors.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A required JSON key is missing or has the wrong type.
    #[error("invalid argument: {context}")]
    InvalidArgument {
        /// Context about which field was rejected.
        context: String,
    },

    /// RLP decoding failed.
    #[error("RLP decoding failed: {context}")]
    InvalidRlp {
        /// Context about what was being decoded.
        context: String,
    },

    /// The transaction structure is malformed.
    #[error("malformed transaction: {context}")]
    MalformedTransaction {
        /// Context about what was malformed.
        context: String,
    },

    /// The signature blob is malformed.
    #[error("malformed signature: {context}")]
    MalformedSignature {
        /// Context about what was malformed.
        context: String,
    },

    /// A coin denomination is not a unit of the currency.
    #[error("unknown denomination {denom} for currency {currency}")]
    UnknownDenomination {
        /// The denomination found in the transaction.
        denom: String,
        /// The currency the transaction was parsed against.
        currency: String,
    },

    /// The chain is not registered.
    #[error("unsupported chain: {chain}")]
    UnsupportedChain {
        /// The chain identifier that was requested.
        chain: String,
    },

    /// The address format is invalid for the chain.
    #[error("invalid address: {address}")]
    InvalidAddress {
        /// The malformed address string.
        address: String,
    },

    /// An amount inside the transaction is not a valid number.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl ParseError {
    /// Create an `InvalidArgument` error with context.
    #[must_use]
    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context: context.into(),
        }
    }

    /// Create an `InvalidRlp` error with context.
    #[must_use]
    pub fn invalid_rlp(context: impl Into<String>) -> Self {
        Self::InvalidRlp {
            context: context.into(),
        }
    }

    /// Create a `MalformedTransaction` error with context.
    #[must_use]
    pub fn malformed_transaction(context: impl Into<String>) -> Self {
        Self::MalformedTransaction {
            context: context.into(),
        }
    }

    /// Create a `MalformedSignature` error with context.
    #[must_use]
    pub fn malformed_signature(context: impl Into<String>) -> Self {
        Self::MalformedSignature {
            context: context.into(),
        }
    }

    /// Create an `UnknownDenomination` error.
    #[must_use]
    pub fn unknown_denomination(denom: impl Into<String>, currency: impl Into<String>) -> Self {
        Self::UnknownDenomination {
            denom: denom.into(),
            currency: currency.into(),
        }
    }

    /// Create an `UnsupportedChain` error.
    #[must_use]
    pub fn unsupported_chain(chain: impl Into<String>) -> Self {
        Self::UnsupportedChain {
            chain: chain.into(),
        }
    }

    /// Create an `InvalidAddress` error.
    #[must_use]
    pub fn invalid_address(address: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
        }
    }
}

// ============================================================================
// AmountError
// ============================================================================

/// Errors raised by [`BigInt`](crate::amount::BigInt) construction and
/// amount scaling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The input is not a valid number in the expected radix.
    #[error("malformed number: {value:?}")]
    MalformedNumber {
        /// The rejected input.
        value: String,
    },

    /// The decimal input has more fractional digits than the unit allows.
    #[error("{value} has more than {decimals} fractional digits")]
    PrecisionLoss {
        /// The rejected input.
        value: String,
        /// The number of decimals of the target unit.
        decimals: u32,
    },

    /// The currency has no unit with this name.
    #[error("unknown unit {unit} for currency {currency}")]
    UnknownUnit {
        /// The requested unit name.
        unit: String,
        /// The currency that was searched.
        currency: String,
    },
}

impl AmountError {
    /// Create a `MalformedNumber` error.
    #[must_use]
    pub fn malformed_number(value: impl Into<String>) -> Self {
        Self::MalformedNumber {
            value: value.into(),
        }
    }

    /// Create an `UnknownUnit` error.
    #[must_use]
    pub fn unknown_unit(unit: impl Into<String>, currency: impl Into<String>) -> Self {
        Self::UnknownUnit {
            unit: unit.into(),
            currency: currency.into(),
        }
    }
}

// ============================================================================
// BuildError
// ============================================================================

/// Errors that can occur while accumulating or building a transaction.
///
/// Setter failures are returned synchronously; failures of the injected
/// build function travel through the build future (or callback sink).
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// An amount setter received a value that is not a valid integer.
    #[error("invalid amount: {value:?}")]
    InvalidAmount {
        /// The rejected input.
        value: String,
    },

    /// An address setter received a value that cannot be encoded.
    #[error("invalid address: {address}")]
    InvalidAddress {
        /// The rejected address.
        address: String,
    },

    /// The build function needs a field the request does not carry.
    #[error("missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// The account balance cannot cover the value and fees.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Balance reported by the explorer.
        balance: String,
        /// Amount the transaction needs.
        required: String,
    },

    /// The explorer collaborator failed.
    #[error("explorer error: {context}")]
    Explorer {
        /// Context about the failure.
        context: String,
    },

    /// The build future was dropped before it settled.
    #[error("build cancelled")]
    Cancelled,

    /// Assembling the transaction failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl BuildError {
    /// Create an `InvalidAmount` error.
    #[must_use]
    pub fn invalid_amount(value: impl Into<String>) -> Self {
        Self::InvalidAmount {
            value: value.into(),
        }
    }

    /// Create an `InvalidAddress` error.
    #[must_use]
    pub fn invalid_address(address: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
        }
    }

    /// Create a `MissingField` error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an `Explorer` error.
    #[must_use]
    pub fn explorer(context: impl Into<String>) -> Self {
        Self::Explorer {
            context: context.into(),
        }
    }

    /// Get the stable error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        ErrorCode::from(self)
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {context}")]
    ParseFailed {
        /// Context about the parsing failure.
        context: String,
    },

    /// A configuration value is invalid.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// The field name with the invalid value.
        field: String,
        /// The invalid value.
        value: String,
    },

    /// A required configuration field is missing.
    #[error("missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// File system I/O error.
    #[error("{context}: {source}")]
    Io {
        /// What was being done when the error occurred.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

impl ConfigError {
    /// Create a `FileNotFound` error.
    #[must_use]
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a `ParseFailed` error.
    #[must_use]
    pub fn parse_failed(context: impl Into<String>) -> Self {
        Self::ParseFailed {
            context: context.into(),
        }
    }

    /// Create an `InvalidValue` error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a `MissingField` error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an `Io` error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a `NoHomeDirectory` error.
    #[must_use]
    pub const fn no_home_directory() -> Self {
        Self::NoHomeDirectory
    }
}

// ============================================================================
// Result type aliases
// ============================================================================

/// A `Result` type alias using [`TxForgeError`] as the error type.
pub type Result<T> = std::result::Result<T, TxForgeError>;

/// A `Result` type alias for parsing operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// A `Result` type alias for build operations.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// A `Result` type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// ============================================================================
// Unit Tests
// ============================================================================
