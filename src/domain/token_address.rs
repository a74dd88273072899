//! EVM token address.

use core::fmt;
use core::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::PositionMathError;

/// A 20-byte EVM contract address identifying an ERC-20 token.
///
/// Ordering is numeric (big-endian byte order), which is exactly the
/// ordering Uniswap uses to decide which token of a pool is `token0`.
/// Parsing accepts hex with or without the `0x` prefix and ignores
/// checksum casing.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::TokenAddress;
///
/// let weth: TokenAddress = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".parse().expect("hex");
/// let usdc: TokenAddress = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".parse().expect("hex");
/// assert!(usdc.sorts_before(&weth));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAddress(Address);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(Address::new(bytes))
    }

    /// Wraps an [`Address`].
    #[must_use]
    pub const fn from_address(address: Address) -> Self {
        Self(address)
    }

    /// Returns the underlying [`Address`].
    #[must_use]
    pub const fn as_address(&self) -> Address {
        self.0
    }

    /// Returns `true` if this address is numerically smaller than `other`,
    /// i.e. this token would be `token0` of a pool containing both.
    #[must_use]
    pub fn sorts_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }
}

impl From<Address> for TokenAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl FromStr for TokenAddress {
    type Err = PositionMathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_str(s.trim())
            .map(Self)
            .map_err(|e| PositionMathError::Parse(format!("token address {s:?}: {e}")))
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
