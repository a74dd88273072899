//! Q64.96 square-root price.

use core::fmt;
use core::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PositionMathError;

/// `sqrt(1.0001^MIN_TICK) · 2^96`, the smallest sqrt price a pool can reach.
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4_295_128_739, 0, 0, 0]);

/// `sqrt(1.0001^MAX_TICK) · 2^96`, the largest sqrt price a pool can reach.
pub const MAX_SQRT_RATIO: U256 = U256::from_limbs([
    6_743_328_256_752_651_558,
    17_280_870_778_742_802_505,
    4_294_805_859,
    0,
]);

/// `2^96`, the Q96 scaling constant.
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// Square root of the raw token1/token0 ratio, in Q64.96 fixed point.
///
/// This is the `sqrtPriceX96` field of a Uniswap V3 pool's `slot0`. Values
/// are validated to `[MIN_SQRT_RATIO, MAX_SQRT_RATIO]`. Serialized as a
/// decimal string.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::SqrtPriceX96;
///
/// let one: SqrtPriceX96 = "79228162514264337593543950336".parse().expect("2^96");
/// assert_eq!(one, SqrtPriceX96::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SqrtPriceX96(U256);

impl SqrtPriceX96 {
    /// Lowest valid value.
    pub const MIN: Self = Self(MIN_SQRT_RATIO);

    /// Highest valid value.
    pub const MAX: Self = Self(MAX_SQRT_RATIO);

    /// A raw ratio of exactly 1 (tick 0).
    pub const ONE: Self = Self(Q96);

    /// Creates a validated sqrt price.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidSqrtPrice`] if `value` lies
    /// outside `[MIN_SQRT_RATIO, MAX_SQRT_RATIO]`.
    pub fn new(value: U256) -> crate::error::Result<Self> {
        if value < MIN_SQRT_RATIO {
            return Err(PositionMathError::InvalidSqrtPrice(
                "below MIN_SQRT_RATIO",
            ));
        }
        if value > MAX_SQRT_RATIO {
            return Err(PositionMathError::InvalidSqrtPrice(
                "above MAX_SQRT_RATIO",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw Q64.96 value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }
}

impl FromStr for SqrtPriceX96 {
    type Err = PositionMathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = U256::from_str_radix(s.trim(), 10)
            .map_err(|e| PositionMathError::Parse(format!("sqrt price {s:?}: {e}")))?;
        Self::new(raw)
    }
}

impl fmt::Display for SqrtPriceX96 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for SqrtPriceX96 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_decimal::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for SqrtPriceX96 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: U256 = crate::serde_decimal::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
