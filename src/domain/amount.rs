//! Token amounts held by a position.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Raw token0/token1 amounts (smallest units) backing a position.
///
/// Amounts never carry decimals; pair them with a
/// [`Token`](super::Token) to interpret them.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use clmm_position_math::domain::TokenAmounts;
///
/// let a = TokenAmounts::new(U256::from(5u8), U256::ZERO);
/// assert!(a.is_single_sided());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TokenAmounts {
    #[serde(with = "crate::serde_decimal")]
    token0: U256,
    #[serde(with = "crate::serde_decimal")]
    token1: U256,
}

impl TokenAmounts {
    /// No tokens.
    pub const ZERO: Self = Self {
        token0: U256::ZERO,
        token1: U256::ZERO,
    };

    /// Creates a pair of raw amounts.
    #[must_use]
    pub const fn new(token0: U256, token1: U256) -> Self {
        Self { token0, token1 }
    }

    /// Raw amount of `token0`.
    #[must_use]
    pub const fn token0(&self) -> U256 {
        self.token0
    }

    /// Raw amount of `token1`.
    #[must_use]
    pub const fn token1(&self) -> U256 {
        self.token1
    }

    /// Returns `(base, quote)` amounts given which side is the base token.
    #[must_use]
    pub const fn split(&self, base_is_token0: bool) -> (U256, U256) {
        if base_is_token0 {
            (self.token0, self.token1)
        } else {
            (self.token1, self.token0)
        }
    }

    /// Returns `true` when at most one of the two amounts is non-zero.
    #[must_use]
    pub fn is_single_sided(&self) -> bool {
        self.token0.is_zero() || self.token1.is_zero()
    }

    /// Component-wise checked addition.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        Some(Self {
            token0: self.token0.checked_add(other.token0)?,
            token1: self.token1.checked_add(other.token1)?,
        })
    }
}

impl fmt::Display for TokenAmounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token0={}, token1={}", self.token0, self.token1)
    }
}
