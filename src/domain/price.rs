//! Decimal-scaled price of a base token in quote-token units.

use core::fmt;
use core::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Decimals;
use crate::error::PositionMathError;

/// Price of **one whole base token** expressed in raw quote-token units.
///
/// For WETH/USDC with WETH as base, a price of `2_500_000_000` means
/// 1 WETH (`10^18` wei) is worth 2 500 USDC (`2_500 · 10^6` raw units).
/// Storing the price this way keeps every conversion in integer space: the
/// only decimals needed are the base token's, to undo the "whole token"
/// scaling.
///
/// Prices are strictly positive; zero is rejected at construction.
/// Serialized as a decimal string.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::{Decimals, Price};
///
/// let usdc = Decimals::new(6).expect("valid");
/// let p = Price::from_decimal_str("2500.5", usdc).expect("valid price");
/// assert_eq!(p.get().to_string(), "2500500000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(U256);

impl Price {
    /// Smallest representable price (one raw quote unit).
    pub const MIN: Self = Self(U256::from_limbs([1, 0, 0, 0]));

    /// Creates a price from raw quote units per whole base token.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidPrice`] if `raw` is zero.
    pub fn new(raw: U256) -> crate::error::Result<Self> {
        if raw.is_zero() {
            return Err(PositionMathError::InvalidPrice("price must be positive"));
        }
        Ok(Self(raw))
    }

    /// Convenience constructor from a `u128`.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidPrice`] if `raw` is zero.
    pub fn from_u128(raw: u128) -> crate::error::Result<Self> {
        Self::new(U256::from(raw))
    }

    /// Parses a human-readable decimal price such as `"2500.25"` into raw
    /// quote units. Digits beyond the quote token's precision are truncated.
    ///
    /// # Errors
    ///
    /// - [`PositionMathError::Parse`] for anything that is not an unsigned
    ///   decimal number.
    /// - [`PositionMathError::InvalidPrice`] if the result is zero.
    /// - [`PositionMathError::Overflow`] if the result exceeds 256 bits.
    pub fn from_decimal_str(s: &str, quote_decimals: Decimals) -> crate::error::Result<Self> {
        let trimmed = s.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let well_formed = !(whole.is_empty() && fraction.is_empty())
            && whole.chars().all(|c| c.is_ascii_digit())
            && fraction.chars().all(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(PositionMathError::Parse(format!("price {s:?}")));
        }

        let places = usize::from(quote_decimals.get());
        let mut frac_digits: String = fraction.chars().take(places).collect();
        while frac_digits.len() < places {
            frac_digits.push('0');
        }
        let digits = format!("{whole}{frac_digits}");
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Err(PositionMathError::InvalidPrice("price must be positive"));
        }
        let raw = U256::from_str_radix(digits, 10)
            .map_err(|_| PositionMathError::Overflow("price exceeds 256 bits"))?;
        Self::new(raw)
    }

    /// Returns the raw quote units per whole base token.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Converts to a display-only `f64` in whole quote tokens.
    #[must_use]
    pub fn to_f64(&self, quote_decimals: Decimals) -> f64 {
        quote_decimals.to_display(self.0)
    }
}

impl FromStr for Price {
    type Err = PositionMathError;

    /// Parses a raw (already scaled) decimal integer string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = U256::from_str_radix(s.trim(), 10)
            .map_err(|e| PositionMathError::Parse(format!("price {s:?}: {e}")))?;
        Self::new(raw)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_decimal::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: U256 = crate::serde_decimal::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// An inclusive price window `[min, max]` with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PriceRangeRepr")]
pub struct PriceRange {
    min: Price,
    max: Price,
}

#[derive(Deserialize)]
struct PriceRangeRepr {
    min: Price,
    max: Price,
}

impl TryFrom<PriceRangeRepr> for PriceRange {
    type Error = PositionMathError;

    fn try_from(repr: PriceRangeRepr) -> Result<Self, Self::Error> {
        Self::new(repr.min, repr.max)
    }
}

impl PriceRange {
    /// Creates a validated price window.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidRange`] if `min >= max`.
    pub fn new(min: Price, max: Price) -> crate::error::Result<Self> {
        if min >= max {
            return Err(PositionMathError::InvalidRange(
                "price range minimum must be below maximum",
            ));
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> Price {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> Price {
        self.max
    }

    /// Returns `true` if `price` lies within the window (inclusive).
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        price >= self.min && price <= self.max
    }
}
