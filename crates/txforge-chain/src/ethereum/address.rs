//! EIP-55 address encoding.

use std::str::FromStr;

use alloy_primitives::Address;
use txforge_core::error::ParseError;

/// Length of an Ethereum address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Normalize a hex address, with or without `0x`, to its EIP-55 checksummed
/// form.
///
/// The input checksum is not verified; any casing is accepted.
///
/// # Errors
///
/// Returns [`ParseError::InvalidAddress`] if the input is not 20 hex-encoded
/// bytes.
///
/// # Example
///
/// ```
/// use txforge_chain::ethereum::to_eip55;
///
/// assert_eq!(
///     to_eip55("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap(),
///     "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
/// );
/// assert!(to_eip55("0x1234").is_err());
/// ```
pub fn to_eip55(address: &str) -> Result<String, ParseError> {
    Address::from_str(address)
        .map(|parsed| parsed.to_checksum(None))
        .map_err(|_| ParseError::invalid_address(address))
}

/// EIP-55 form of a raw 20-byte address.
///
/// # Errors
///
/// Returns [`ParseError::MalformedTransaction`] if `bytes` is not 20 bytes long.
pub fn eip55_from_bytes(bytes: &[u8]) -> Result<String, ParseError> {
    if bytes.len() != ADDRESS_LENGTH {
        return Err(ParseError::malformed_transaction(format!(
            "receiver must be {ADDRESS_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(Address::from_slice(bytes).to_checksum(None))
}

/// Raw bytes of a hex address.
///
/// # Errors
///
/// Returns [`ParseError::InvalidAddress`] if the input is not 20 hex-encoded
/// bytes.
pub fn address_bytes(address: &str) -> Result<[u8; ADDRESS_LENGTH], ParseError> {
    Address::from_str(address)
        .map(|parsed| parsed.0 .0)
        .map_err(|_| ParseError::invalid_address(address))
}
