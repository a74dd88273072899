//! Canonically ordered token pairs and base/quote orientation.

use serde::{Deserialize, Serialize};

use super::{Token, TokenAddress};
use crate::error::PositionMathError;

/// An ordered pair of distinct tokens, sorted the way a Uniswap pool sorts
/// them: `token0` has the numerically lower address.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::{Decimals, Token, TokenAddress, TokenPair};
///
/// let tok_a = Token::new(TokenAddress::from_bytes([1u8; 20]), Decimals::new(6).expect("valid"));
/// let tok_b = Token::new(TokenAddress::from_bytes([2u8; 20]), Decimals::new(18).expect("valid"));
///
/// let pair = TokenPair::new(tok_b, tok_a).expect("distinct tokens");
/// assert_eq!(pair.token0(), tok_a);
/// assert_eq!(pair.token1(), tok_b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    token0: Token,
    token1: Token,
}

impl TokenPair {
    /// Creates a new canonically-ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidToken`] if both tokens have the
    /// same address.
    pub fn new(first: Token, second: Token) -> Result<Self, PositionMathError> {
        if first.address() == second.address() {
            return Err(PositionMathError::InvalidToken(
                "token pair requires two distinct addresses",
            ));
        }
        let (token0, token1) = if first.sorts_before(&second) {
            (first, second)
        } else {
            (second, first)
        };
        Ok(Self { token0, token1 })
    }

    /// Returns the token with the lower address.
    #[must_use]
    pub const fn token0(&self) -> Token {
        self.token0
    }

    /// Returns the token with the higher address.
    #[must_use]
    pub const fn token1(&self) -> Token {
        self.token1
    }

    /// Orients the pair with the given side as quote token.
    #[must_use]
    pub const fn orient(&self, quote: QuoteSide) -> PairOrientation {
        match quote {
            QuoteSide::Token0 => PairOrientation {
                base: self.token1,
                quote: self.token0,
            },
            QuoteSide::Token1 => PairOrientation {
                base: self.token0,
                quote: self.token1,
            },
        }
    }
}

/// Which pool token values and prices are denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteSide {
    /// `token0` is the quote token; prices read "token0 per token1".
    Token0,
    /// `token1` is the quote token; prices read "token1 per token0".
    Token1,
}

impl QuoteSide {
    /// Maps the `token0IsQuote` flag carried by position records.
    #[must_use]
    pub const fn from_token0_is_quote(token0_is_quote: bool) -> Self {
        if token0_is_quote {
            Self::Token0
        } else {
            Self::Token1
        }
    }
}

/// A base/quote view of a token pair.
///
/// Prices are "quote per one whole base token" and values are expressed in
/// raw quote-token units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairOrientation {
    base: Token,
    quote: Token,
}

impl PairOrientation {
    /// Creates an orientation from explicit base and quote tokens.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidToken`] if both tokens share an
    /// address.
    pub fn new(base: Token, quote: Token) -> Result<Self, PositionMathError> {
        base_is_token0(&base.address(), &quote.address())?;
        Ok(Self { base, quote })
    }

    /// Returns the base token.
    #[must_use]
    pub const fn base(&self) -> Token {
        self.base
    }

    /// Returns the quote token.
    #[must_use]
    pub const fn quote(&self) -> Token {
        self.quote
    }

    /// Returns `true` when the base token is the pool's `token0`.
    #[must_use]
    pub fn base_is_token0(&self) -> bool {
        self.base.sorts_before(&self.quote)
    }

    /// Returns which pool token is the quote.
    #[must_use]
    pub fn quote_side(&self) -> QuoteSide {
        if self.base_is_token0() {
            QuoteSide::Token1
        } else {
            QuoteSide::Token0
        }
    }
}

/// Decides whether the base token is `token0` from raw addresses.
///
/// # Errors
///
/// Returns [`PositionMathError::InvalidToken`] if the addresses are equal.
pub fn base_is_token0(
    base: &TokenAddress,
    quote: &TokenAddress,
) -> Result<bool, PositionMathError> {
    if base == quote {
        return Err(PositionMathError::InvalidToken(
            "base and quote tokens must differ",
        ));
    }
    Ok(base.sorts_before(quote))
}
