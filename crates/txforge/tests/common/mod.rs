//! # Test Utilities for txforge
//!
//! - [`load_fixture`] - Load a JSON fixture from `tests/fixtures/`
//! - [`raw_tx`] - The `raw_tx` of a fixture as parser input
//! - [`temp_data_dir`] - Isolated temporary directory
//!
//! ## Proptest Strategies
//!
//! - [`ethereum_address`] - Lowercase `0x` addresses
//! - [`wei_amount`] - Decimal wei amounts
//! - [`cosmos_memo`] - Printable memos, quotes and backslashes included

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::path::PathBuf;

use alloy_primitives::hex;
use proptest::prelude::*;
use tempfile::TempDir;

/// Error type for fixture loading operations.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The fixture file could not be found.
    #[error("Fixture not found: {0}")]
    NotFound(String),

    /// The fixture file could not be read.
    #[error("Failed to read fixture: {0}")]
    ReadError(#[from] std::io::Error),

    /// The fixture JSON could not be parsed.
    #[error("Failed to parse fixture JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Load a JSON fixture, `path` being relative to `tests/fixtures/` at the
/// workspace root (e.g. `"cosmos/send_sign_doc.json"`).
pub fn load_fixture(path: &str) -> Result<serde_json::Value, FixtureError> {
    let fixture_path = fixtures_dir().join(path);

    if !fixture_path.exists() {
        return Err(FixtureError::NotFound(fixture_path.display().to_string()));
    }

    let content = std::fs::read_to_string(&fixture_path)?;
    Ok(serde_json::from_str(&content)?)
}

/// The fixture's `raw_tx` as the bytes a parser takes: hex strings are
/// decoded, JSON objects are serialized.
pub fn raw_tx(fixture: &serde_json::Value) -> Vec<u8> {
    match &fixture["raw_tx"] {
        serde_json::Value::String(encoded) => {
            hex::decode(encoded).expect("fixture raw_tx should be hex")
        }
        other => other.to_string().into_bytes(),
    }
}

/// The fixture's `raw_tx` as a command-line argument.
pub fn raw_tx_arg(fixture: &serde_json::Value) -> String {
    match &fixture["raw_tx"] {
        serde_json::Value::String(encoded) => encoded.clone(),
        other => other.to_string(),
    }
}

/// `tests/fixtures` at the workspace root.
fn fixtures_dir() -> PathBuf {
    // crates/txforge -> crates -> workspace
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .parent()
        .and_then(|p| p.parent())
        .map_or_else(
            || PathBuf::from("tests/fixtures"),
            |p| p.join("tests").join("fixtures"),
        )
}

/// Create a temporary directory, removed on drop.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn temp_data_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("txforge-test-")
        .tempdir()
        .expect("Failed to create temporary directory for test")
}

// =============================================================================
// Proptest Strategies
// =============================================================================

/// A lowercase `0x`-prefixed 20-byte address.
pub fn ethereum_address() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::num::u8::ANY, 20).prop_map(hex::encode_prefixed)
}

/// A wei amount from 0 to 10^21 as a decimal string.
pub fn wei_amount() -> impl Strategy<Value = String> {
    (0u128..=1_000_000_000_000_000_000_000u128).prop_map(|amount| amount.to_string())
}

/// A nonce in `[0, 1_000_000]`.
pub fn nonce() -> impl Strategy<Value = u64> {
    0u64..=1_000_000u64
}

/// A gas limit from a plain transfer to a heavy contract call.
pub fn gas_limit() -> impl Strategy<Value = u64> {
    21_000u64..=10_000_000u64
}

/// A memo of up to 64 printable characters, JSON metacharacters included.
pub fn cosmos_memo() -> impl Strategy<Value = String> {
    "[ -~]{0,64}"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_dir_exists() {
        let dir = fixtures_dir();
        assert!(dir.exists(), "Fixtures directory should exist: {dir:?}");
    }

    #[test]
    fn test_temp_data_dir_isolation() {
        let dir1 = temp_data_dir();
        let dir2 = temp_data_dir();
        assert_ne!(dir1.path(), dir2.path());
    }

    proptest! {
        #[test]
        fn test_ethereum_address_format(addr in ethereum_address()) {
            prop_assert!(addr.starts_with("0x"));
            prop_assert_eq!(addr.len(), 42);
        }

        #[test]
        fn test_wei_amount_parseable(amount in wei_amount()) {
            prop_assert!(amount.parse::<u128>().is_ok());
        }
    }
}
