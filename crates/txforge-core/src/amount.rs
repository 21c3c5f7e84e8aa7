//! Arbitrary precision integers and currency amounts.
//!
//! Monetary values, gas and fees are never stored in fixed-width integers:
//! every value goes through [`BigInt`], which round-trips through its decimal
//! string form without loss regardless of magnitude.
//!
//! Scaling between a unit's human-readable decimal string and the currency's
//! base denomination is `base = decimal * 10^decimals`:
//!
//! ```
//! use txforge_core::amount::{scale_to_base, scale_to_display, BigInt};
//!
//! let base = scale_to_base("1.5", 6).unwrap();
//! assert_eq!(base, BigInt::from(1_500_000u64));
//! assert_eq!(scale_to_display(&base, 6), "1.5");
//! ```

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::currency::{Currency, CurrencyUnit};
use crate::error::AmountError;

// ============================================================================
// BigInt
// ============================================================================

/// Arbitrary precision signed integer.
///
/// Immutable value type. Serializes as a decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigInt(num_bigint::BigInt);

impl BigInt {
    /// The value zero.
    #[must_use]
    pub fn zero() -> Self {
        Self(num_bigint::BigInt::zero())
    }

    /// Parse a base-10 integer with an optional leading `-`.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::MalformedNumber`] if the input is empty or
    /// contains anything besides ASCII digits after the optional sign.
    ///
    /// # Example
    ///
    /// ```
    /// use txforge_core::amount::BigInt;
    ///
    /// let value = BigInt::from_decimal_str("-123456789012345678901234567890").unwrap();
    /// assert!(value.is_negative());
    /// assert!(BigInt::from_decimal_str("12a").is_err());
    /// assert!(BigInt::from_decimal_str("").is_err());
    /// ```
    pub fn from_decimal_str(value: &str) -> Result<Self, AmountError> {
        let digits = value.strip_prefix('-').unwrap_or(value);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::malformed_number(value));
        }

        num_bigint::BigInt::parse_bytes(value.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| AmountError::malformed_number(value))
    }

    /// Parse an unsigned base-16 integer with an optional `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::MalformedNumber`] if no hex digits follow the
    /// prefix or a non-hex character is present.
    ///
    /// # Example
    ///
    /// ```
    /// use txforge_core::amount::BigInt;
    ///
    /// assert_eq!(BigInt::from_hex("0x5208").unwrap(), BigInt::from(21_000u64));
    /// assert_eq!(BigInt::from_hex("ff").unwrap(), BigInt::from(255u64));
    /// assert!(BigInt::from_hex("0x").is_err());
    /// ```
    pub fn from_hex(value: &str) -> Result<Self, AmountError> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AmountError::malformed_number(value));
        }

        num_bigint::BigInt::parse_bytes(digits.as_bytes(), 16)
            .map(Self)
            .ok_or_else(|| AmountError::malformed_number(value))
    }

    /// Interpret bytes as an unsigned big-endian integer.
    ///
    /// An empty slice is zero, which is how RLP encodes the integer zero.
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self(num_bigint::BigInt::from_bytes_be(
            num_bigint::Sign::Plus,
            bytes,
        ))
    }

    /// Minimal big-endian magnitude bytes.
    ///
    /// Zero encodes as an empty vector. The sign is dropped.
    #[must_use]
    pub fn to_be_bytes(&self) -> Vec<u8> {
        if self.0.is_zero() {
            return Vec::new();
        }
        self.0.magnitude().to_bytes_be()
    }

    /// Lowercase hex representation with a `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        if self.0.is_negative() {
            format!("-0x{}", self.0.magnitude().to_str_radix(16))
        } else {
            format!("0x{}", self.0.to_str_radix(16))
        }
    }

    /// Raise to the power `exponent`.
    #[must_use]
    pub fn pow(&self, exponent: u32) -> Self {
        Self(num_traits::pow(
            self.0.clone(),
            usize::try_from(exponent).unwrap_or(usize::MAX),
        ))
    }

    /// Whether this value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether this value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Convert to `u64` if the value fits.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Integer division rounding toward positive infinity.
    ///
    /// Returns `None` when `divisor` is zero.
    #[must_use]
    pub fn div_ceil(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        let quotient = &self.0 / &divisor.0;
        let remainder = &self.0 % &divisor.0;
        if !remainder.is_zero() && (remainder.is_negative() == divisor.0.is_negative()) {
            Some(Self(quotient + 1))
        } else {
            Some(Self(quotient))
        }
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BigInt {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self(num_bigint::BigInt::from(value))
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        Self(num_bigint::BigInt::from(value))
    }
}

impl From<u128> for BigInt {
    fn from(value: u128) -> Self {
        Self(num_bigint::BigInt::from(value))
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                BigInt(self.0.$method(rhs.0))
            }
        }

        impl<'a> $trait<&'a BigInt> for &'a BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &'a BigInt) -> BigInt {
                BigInt((&self.0).$method(&rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl std::iter::Sum for BigInt {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, value| acc + value)
    }
}

impl Serialize for BigInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_decimal_str(&value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Scaling
// ============================================================================

/// Scale a decimal string expressed in a unit with `decimals` fractional
/// digits into the base denomination.
///
/// Trailing fractional zeros are ignored, so `"1.50"` with 1 decimal is
/// accepted. Nothing is ever rounded.
///
/// # Errors
///
/// - [`AmountError::MalformedNumber`] if the input is not `[-]digits[.digits]`
/// - [`AmountError::PrecisionLoss`] if the significant fraction is longer than
///   `decimals`
///
/// # Example
///
/// ```
/// use txforge_core::amount::{scale_to_base, BigInt};
///
/// assert_eq!(scale_to_base("5", 0).unwrap(), BigInt::from(5u64));
/// assert_eq!(scale_to_base("0.000001", 6).unwrap(), BigInt::from(1u64));
/// assert!(scale_to_base("0.0000001", 6).is_err());
/// ```
pub fn scale_to_base(decimal: &str, decimals: u32) -> Result<BigInt, AmountError> {
    let (negative, unsigned) = decimal
        .strip_prefix('-')
        .map_or((false, decimal), |rest| (true, rest));
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => {
            if fraction.is_empty() {
                return Err(AmountError::malformed_number(decimal));
            }
            (integer, fraction)
        }
        None => (unsigned, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if integer.is_empty() || !all_digits(integer) || !all_digits(fraction) {
        return Err(AmountError::malformed_number(decimal));
    }

    let significant = fraction.trim_end_matches('0');
    let width = usize::try_from(decimals).unwrap_or(usize::MAX);
    if significant.len() > width {
        return Err(AmountError::PrecisionLoss {
            value: decimal.to_string(),
            decimals,
        });
    }

    let mut digits = String::with_capacity(integer.len() + width + 1);
    if negative {
        digits.push('-');
    }
    digits.push_str(integer);
    digits.push_str(significant);
    digits.extend(std::iter::repeat('0').take(width - significant.len()));

    BigInt::from_decimal_str(&digits)
}

/// Render a base-denomination value as a normalized decimal string in a unit
/// with `decimals` fractional digits.
///
/// The output has no trailing fractional zeros and no trailing `.`.
#[must_use]
pub fn scale_to_display(base: &BigInt, decimals: u32) -> String {
    let magnitude = base.abs().to_string();
    let width = usize::try_from(decimals).unwrap_or(usize::MAX);

    let padded = if magnitude.len() <= width {
        let mut padded = "0".repeat(width - magnitude.len() + 1);
        padded.push_str(&magnitude);
        padded
    } else {
        magnitude
    };

    let (integer, fraction) = padded.split_at(padded.len() - width);
    let fraction = fraction.trim_end_matches('0');
    let sign = if base.is_negative() { "-" } else { "" };

    if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    }
}

// ============================================================================
// Amount
// ============================================================================

/// A value in a currency's base denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    currency: Currency,
    value: BigInt,
}

impl Amount {
    /// Create an amount from a base-denomination value.
    #[must_use]
    pub const fn new(currency: Currency, value: BigInt) -> Self {
        Self { currency, value }
    }

    /// Create an amount from a decimal string expressed in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::UnknownUnit`] if the currency has no unit named
    /// `unit`, or any error of [`scale_to_base`].
    pub fn from_unit_str(currency: &Currency, decimal: &str, unit: &str) -> Result<Self, AmountError> {
        let unit = currency
            .unit(unit)
            .ok_or_else(|| AmountError::unknown_unit(unit, &currency.name))?;
        let value = scale_to_base(decimal, unit.number_of_decimals)?;
        Ok(Self::new(currency.clone(), value))
    }

    /// The currency of this amount.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// The base-denomination value.
    #[must_use]
    pub const fn value(&self) -> &BigInt {
        &self.value
    }

    /// Render this amount in `unit`.
    #[must_use]
    pub fn to_unit_string(&self, unit: &CurrencyUnit) -> String {
        scale_to_display(&self.value, unit.number_of_decimals)
    }
}

impl fmt::Display for Amount {
    /// Formats the base-denomination value, like the decimal string the
    /// builders consume.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

// ============================================================================
// Tests
// ============================================================================
