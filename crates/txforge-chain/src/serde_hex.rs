//! Serialize byte fields as `0x`-prefixed hex strings.

use alloy_primitives::hex;
use serde::Serializer;

/// Serialize bytes as `0x`-prefixed lowercase hex.
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn serialize<S: Serializer, T: AsRef<[u8]>>(bytes: T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode_prefixed(bytes))
}

/// Serialize optional bytes as `0x`-prefixed lowercase hex or `null`.
///
/// # Errors
///
/// Propagates the serializer's error.
#[allow(clippy::ref_option)]
pub fn serialize_option<S: Serializer, T: AsRef<[u8]>>(
    bytes: &Option<T>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match bytes {
        Some(bytes) => serialize(bytes, serializer),
        None => serializer.serialize_none(),
    }
}
