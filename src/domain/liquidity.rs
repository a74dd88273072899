//! Liquidity units for concentrated positions.

use core::fmt;
use core::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::PositionMathError;

/// Liquidity units (`L`) of a concentrated position.
///
/// This is distinct from a token amount: it measures depth across a price
/// range and only becomes token0/token1 amounts in combination with a range
/// and a current price. All `u128` values are valid, matching the on-chain
/// `uint128 liquidity` field. Serialized as a decimal string.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::Liquidity;
///
/// let a: Liquidity = "1000".parse().expect("decimal");
/// let b = Liquidity::new(2_000);
/// assert_eq!(a.checked_add(&b), Some(Liquidity::new(3_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liquidity(#[serde(with = "crate::serde_decimal")] u128);

impl Liquidity {
    /// No liquidity.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Liquidity` from a raw `u128` value.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns the value widened to [`U256`].
    #[must_use]
    pub fn to_u256(&self) -> U256 {
        U256::from(self.0)
    }

    /// Returns `true` if the liquidity is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl FromStr for Liquidity {
    type Err = PositionMathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u128>()
            .map(Self)
            .map_err(|e| PositionMathError::Parse(format!("liquidity {s:?}: {e}")))
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
