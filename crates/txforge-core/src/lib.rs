//! # txforge-core
//!
//! Foundational types shared across the `txforge` crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types, stable error codes and result aliases
//! - [`amount`] - Arbitrary precision [`BigInt`], [`Amount`] and unit scaling
//! - [`currency`] - [`Currency`] descriptors and the [`CurrencyRegistry`]
//! - [`config`] - TOML configuration types
//! - [`config_loader`] - Loading and saving `~/.txforge/config.toml`
//!
//! ## Error Handling
//!
//! ```rust
//! use txforge_core::error::{ErrorCode, ParseError, TxForgeError};
//!
//! let err: TxForgeError = ParseError::malformed_signature("expected 64 bytes").into();
//! assert_eq!(ErrorCode::from(&err), ErrorCode::MalformedSignature);
//! ```
//!
//! ## Amounts
//!
//! ```rust
//! use txforge_core::{Amount, BigInt, Currency};
//!
//! let amount = Amount::from_unit_str(&Currency::ethereum(), "1.5", "gwei").unwrap();
//! assert_eq!(amount.value(), &BigInt::from(1_500_000_000u64));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod amount;
pub mod config;
pub mod config_loader;
pub mod currency;
pub mod error;

pub use error::{
    AmountError, BuildError, ConfigError, ErrorCode, ParseError, Result, TxForgeError,
};

pub use amount::{scale_to_base, scale_to_display, Amount, BigInt};

pub use currency::{Currency, CurrencyRegistry, CurrencyUnit};

pub use config::{Config, ConfigBuilder, LoggingConfig};

pub use config_loader::{expand_path, ConfigLoader};
