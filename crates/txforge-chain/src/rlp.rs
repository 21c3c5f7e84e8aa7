//! Generic RLP codec.
//!
//! RLP (Recursive Length Prefix) encodes a tree whose leaves are byte
//! strings. This module exposes the tree as [`RlpItem`] and converts it to and
//! from canonical wire bytes. Prefix parsing is delegated to
//! [`alloy_rlp::Header`], which rejects non-canonical length prefixes.
//!
//! # Example
//!
//! ```
//! use txforge_chain::rlp::{decode, encode, RlpItem};
//!
//! // ["cat", "dog"]
//! let bytes = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
//! let item = decode(&bytes).unwrap();
//! assert_eq!(
//!     item,
//!     RlpItem::List(vec![RlpItem::bytes(*b"cat"), RlpItem::bytes(*b"dog")])
//! );
//! assert_eq!(encode(&item), bytes);
//! ```

use alloy_rlp::Header;
use txforge_core::error::ParseError;
use txforge_core::BigInt;

/// Maximum number of nested lists accepted by [`decode`].
pub const MAX_DEPTH: usize = 128;

/// A decoded RLP node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RlpItem {
    /// A byte string leaf.
    Bytes(Vec<u8>),
    /// An ordered list of items.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Create a byte string leaf.
    #[must_use]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Create a leaf holding the minimal big-endian encoding of `value`.
    #[must_use]
    pub fn uint(value: &BigInt) -> Self {
        Self::Bytes(value.to_be_bytes())
    }

    /// The leaf bytes, or `None` for a list.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::List(_) => None,
        }
    }

    /// The list children, or `None` for a leaf.
    #[must_use]
    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            Self::Bytes(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// Whether this item is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode exactly one item spanning the whole buffer.
///
/// # Errors
///
/// Returns [`ParseError::InvalidRlp`] if the buffer is empty or truncated, a
/// length prefix is non-canonical, bytes remain after the item, or lists are
/// nested deeper than [`MAX_DEPTH`].
///
/// # Example
///
/// ```
/// use txforge_chain::rlp::{decode, RlpItem};
///
/// assert_eq!(decode(&[0x80]).unwrap(), RlpItem::bytes(vec![]));
/// assert_eq!(decode(&[0x0f]).unwrap(), RlpItem::bytes(vec![0x0f]));
/// assert!(decode(&[0x83, b'a']).is_err());
/// assert!(decode(&[0x80, 0x80]).is_err());
/// ```
pub fn decode(bytes: &[u8]) -> Result<RlpItem, ParseError> {
    let mut buf = bytes;
    let item = decode_item(&mut buf, 0)?;

    if !buf.is_empty() {
        return Err(ParseError::invalid_rlp(format!(
            "{} trailing bytes after item",
            buf.len()
        )));
    }

    Ok(item)
}

fn decode_item(buf: &mut &[u8], depth: usize) -> Result<RlpItem, ParseError> {
    let header = Header::decode(buf).map_err(|e| ParseError::invalid_rlp(e.to_string()))?;

    let payload = buf.get(..header.payload_length).ok_or_else(|| {
        ParseError::invalid_rlp(format!(
            "payload of {} bytes truncated to {}",
            header.payload_length,
            buf.len()
        ))
    })?;
    *buf = buf.get(header.payload_length..).unwrap_or_default();

    if !header.list {
        return Ok(RlpItem::Bytes(payload.to_vec()));
    }

    if depth >= MAX_DEPTH {
        return Err(ParseError::invalid_rlp(format!(
            "lists nested deeper than {MAX_DEPTH}"
        )));
    }

    let mut items = Vec::new();
    let mut inner = payload;
    while !inner.is_empty() {
        items.push(decode_item(&mut inner, depth + 1)?);
    }
    Ok(RlpItem::List(items))
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode an item canonically.
#[must_use]
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(item, &mut out);
    out
}

fn encode_into(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::Bytes(bytes) => {
            if let [single] = bytes.as_slice() {
                if *single < 0x80 {
                    out.push(*single);
                    return;
                }
            }
            Header {
                list: false,
                payload_length: bytes.len(),
            }
            .encode(out);
            out.extend_from_slice(bytes);
        }
        RlpItem::List(items) => {
            let mut payload = Vec::new();
            for child in items {
                encode_into(child, &mut payload);
            }
            Header {
                list: true,
                payload_length: payload.len(),
            }
            .encode(out);
            out.extend_from_slice(&payload);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::indexing_slicing
    )]

    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_single_byte_is_itself() {
        assert_eq!(decode(&[0x00]).unwrap(), RlpItem::bytes(vec![0x00]));
        assert_eq!(decode(&[0x7f]).unwrap(), RlpItem::bytes(vec![0x7f]));
    }

    #[test]
    fn test_decode_empty_string_and_list() {
        assert_eq!(decode(&[0x80]).unwrap(), RlpItem::bytes(vec![]));
        assert_eq!(decode(&[0xc0]).unwrap(), RlpItem::List(vec![]));
    }

    #[test]
    fn test_decode_long_string() {
        let mut data = vec![0xb8, 56];
        data.extend(std::iter::repeat(0xaa).take(56));
        let item = decode(&data).unwrap();
        assert_eq!(item.as_bytes().unwrap().len(), 56);
        assert_eq!(encode(&item), data);
    }

    #[test]
    fn test_decode_nested_lists() {
        // [ [], [[]], [ [], [[]] ] ]
        let data = [0xc7, 0xc0, 0xc1, 0xc0, 0xc3, 0xc0, 0xc1, 0xc0];
        let item = decode(&data).unwrap();
        let top = item.as_list().unwrap();
        assert_eq!(top.len(), 3);
        assert!(top[1].is_list());
        assert_eq!(encode(&item), data);
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(matches!(decode(&[]), Err(ParseError::InvalidRlp { .. })));
    }

    #[test]
    fn test_decode_rejects_truncated() {
        assert!(matches!(
            decode(&[0x83, 0x01, 0x02]),
            Err(ParseError::InvalidRlp { .. })
        ));
        assert!(matches!(
            decode(&[0xc3, 0x01]),
            Err(ParseError::InvalidRlp { .. })
        ));
        assert!(matches!(decode(&[0xb9, 0x01]), Err(ParseError::InvalidRlp { .. })));
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        assert!(matches!(
            decode(&[0x01, 0x02]),
            Err(ParseError::InvalidRlp { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_non_canonical() {
        // single byte below 0x80 wrapped in a string header
        assert!(decode(&[0x81, 0x05]).is_err());
        // long form used for a short payload
        assert!(decode(&[0xb8, 0x02, 0x01, 0x02]).is_err());
        // length of length with a leading zero
        let mut data = vec![0xb9, 0x00, 0x38];
        data.extend(std::iter::repeat(0u8).take(56));
        assert!(decode(&data).is_err());
    }

    #[test]
    fn test_decode_depth_limit() {
        let nested = |depth: usize| {
            let mut item = RlpItem::List(vec![]);
            for _ in 1..depth {
                item = RlpItem::List(vec![item]);
            }
            encode(&item)
        };

        assert!(decode(&nested(MAX_DEPTH)).is_ok());
        assert!(matches!(
            decode(&nested(MAX_DEPTH + 1)),
            Err(ParseError::InvalidRlp { .. })
        ));
    }

    #[test]
    fn test_encode_uint() {
        assert_eq!(encode(&RlpItem::uint(&BigInt::zero())), vec![0x80]);
        assert_eq!(encode(&RlpItem::uint(&BigInt::from(15u64))), vec![0x0f]);
        assert_eq!(
            encode(&RlpItem::uint(&BigInt::from(1024u64))),
            vec![0x82, 0x04, 0x00]
        );
    }

    fn arb_item() -> impl Strategy<Value = RlpItem> {
        let leaf = proptest::collection::vec(any::<u8>(), 0..80).prop_map(RlpItem::Bytes);
        leaf.prop_recursive(4, 64, 8, |inner| {
            proptest::collection::vec(inner, 0..8).prop_map(RlpItem::List)
        })
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(item in arb_item()) {
            prop_assert_eq!(decode(&encode(&item)).unwrap(), item);
        }

        #[test]
        fn prop_decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode(&bytes);
        }
    }
}
