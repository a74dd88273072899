//! Token identity type.

use serde::{Deserialize, Serialize};

use super::{Decimals, TokenAddress};

/// The identity of an ERC-20 token as far as position math is concerned.
///
/// Only the address (for token0/token1 ordering) and the decimals (for
/// price normalization) matter. Whether the record came from a global token
/// list or was submitted by a user is irrelevant here.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::{Decimals, Token, TokenAddress};
///
/// let addr = TokenAddress::from_bytes([1u8; 20]);
/// let dec  = Decimals::new(6).expect("valid");
/// let tok  = Token::new(addr, dec);
///
/// assert_eq!(tok.address(), addr);
/// assert_eq!(tok.decimals(), dec);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    address: TokenAddress,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`.
    #[must_use]
    pub const fn new(address: TokenAddress, decimals: Decimals) -> Self {
        Self { address, decimals }
    }

    /// Returns the token's address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Returns the token's decimal places.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Returns `true` if this token would be `token0` in a pool with `other`.
    #[must_use]
    pub fn sorts_before(&self, other: &Self) -> bool {
        self.address.sorts_before(&other.address)
    }
}
