//! Conversions between sqrt prices, ticks and decimal-scaled prices.
//!
//! A pool only knows the raw ratio `token1 / token0` (in smallest units),
//! stored as `sqrtPriceX96`. Users think in "quote per one base token".
//! The functions here translate between the two, taking care of
//!
//! - which pool token is the base (the one with the numerically smaller
//!   address is `token0`), and
//! - the base token's decimals, because a [`Price`] is quoted per whole
//!   base token.
//!
//! All arithmetic is integer; `f64` only appears in [`price_to_f64`].
//!
//! # Examples
//!
//! ```
//! use alloy_primitives::U256;
//! use clmm_position_math::domain::{Decimals, SqrtPriceX96};
//! use clmm_position_math::math::sqrt_ratio_x96_to_token1_per_token0;
//!
//! // Raw ratio of 1 with an 18-decimal token0: one whole token0 buys 10^18
//! // raw units of token1.
//! let weth = Decimals::new(18).expect("valid");
//! let price = sqrt_ratio_x96_to_token1_per_token0(SqrtPriceX96::ONE, weth);
//! assert_eq!(price, Ok(U256::from(10u64.pow(18))));
//! ```

use alloy_primitives::{U256, U512};

use super::full_math::{isqrt_u512, narrow, widen};
use super::tick_math::{sqrt_price_x96_to_tick, tick_to_sqrt_price_x96};
use crate::domain::{
    base_is_token0, Decimals, Price, SqrtPriceX96, Tick, TickSpacing, TokenAddress,
};
use crate::error::PositionMathError;

/// Raw token1 units worth one whole token0 at `sqrt`.
///
/// Computes `sqrt² · 10^token0_decimals >> 192` in 512-bit space and
/// floors. The result can be zero for extreme ratios.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if the result exceeds 256 bits
/// (not reachable for a valid sqrt price and decimals `<= 36`).
pub fn sqrt_ratio_x96_to_token1_per_token0(
    sqrt: SqrtPriceX96,
    token0_decimals: Decimals,
) -> crate::error::Result<U256> {
    let s = widen(sqrt.get());
    let scaled = s * s * widen(token0_decimals.factor());
    narrow(scaled >> 192, "token1-per-token0 price exceeds 256 bits")
}

/// Raw token0 units worth one whole token1 at `sqrt`.
///
/// Computes `10^token1_decimals · 2^192 / sqrt²` in 512-bit space and
/// floors.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if the result exceeds 256 bits.
pub fn sqrt_ratio_x96_to_token0_per_token1(
    sqrt: SqrtPriceX96,
    token1_decimals: Decimals,
) -> crate::error::Result<U256> {
    let s = widen(sqrt.get());
    let numerator = widen(token1_decimals.factor()) << 192;
    narrow(numerator / (s * s), "token0-per-token1 price exceeds 256 bits")
}

/// Converts a pool sqrt price into the raw quote units worth one whole base
/// token. The result may be zero for extreme ratios.
///
/// # Errors
///
/// - [`PositionMathError::InvalidToken`] if `base == quote`.
/// - [`PositionMathError::Overflow`] if the price exceeds 256 bits.
pub fn sqrt_price_x96_to_raw_price(
    sqrt: SqrtPriceX96,
    base: &TokenAddress,
    quote: &TokenAddress,
    base_decimals: Decimals,
) -> crate::error::Result<U256> {
    if base_is_token0(base, quote)? {
        sqrt_ratio_x96_to_token1_per_token0(sqrt, base_decimals)
    } else {
        sqrt_ratio_x96_to_token0_per_token1(sqrt, base_decimals)
    }
}

/// Like [`sqrt_price_x96_to_raw_price`], rejecting a zero result.
///
/// # Errors
///
/// As [`sqrt_price_x96_to_raw_price`], plus
/// [`PositionMathError::InvalidPrice`] if the price floors to zero.
pub fn sqrt_price_x96_to_price(
    sqrt: SqrtPriceX96,
    base: &TokenAddress,
    quote: &TokenAddress,
    base_decimals: Decimals,
) -> crate::error::Result<Price> {
    Price::new(sqrt_price_x96_to_raw_price(sqrt, base, quote, base_decimals)?)
}

/// Decimal-scaled price at `tick`, floored.
///
/// # Errors
///
/// - [`PositionMathError::InvalidToken`] if `base == quote`.
/// - [`PositionMathError::InvalidPrice`] if the price floors to zero raw
///   units.
pub fn tick_to_price(
    tick: Tick,
    base: &TokenAddress,
    quote: &TokenAddress,
    base_decimals: Decimals,
) -> crate::error::Result<Price> {
    sqrt_price_x96_to_price(tick_to_sqrt_price_x96(tick)?, base, quote, base_decimals)
}

/// Exact (floored) sqrt price for a decimal-scaled price.
///
/// When the base token is `token0` the raw ratio is
/// `price / 10^base_decimals`; otherwise it is the reciprocal
/// `10^base_decimals / price`. The square root is taken in 512-bit space
/// after shifting by `2^192`, so no precision is lost before the floor.
///
/// # Errors
///
/// - [`PositionMathError::InvalidToken`] if `base == quote`.
/// - [`PositionMathError::InvalidPrice`] if the ratio falls outside the
///   range a pool can represent.
pub fn price_to_sqrt_price_x96(
    price: Price,
    base: &TokenAddress,
    quote: &TokenAddress,
    base_decimals: Decimals,
) -> crate::error::Result<SqrtPriceX96> {
    let p = widen(price.get());
    let factor = widen(base_decimals.factor());
    let ratio_x192: U512 = if base_is_token0(base, quote)? {
        (p << 192) / factor
    } else {
        (factor << 192) / p
    };
    let root = narrow(isqrt_u512(ratio_x192), "sqrt price exceeds 256 bits")
        .map_err(|_| PositionMathError::InvalidPrice("price outside representable range"))?;
    SqrtPriceX96::new(root)
        .map_err(|_| PositionMathError::InvalidPrice("price outside representable range"))
}

/// Converts a decimal-scaled price to the pool tick at or below it, then
/// rounds down (toward negative infinity) to a multiple of `tick_spacing`.
///
/// # Errors
///
/// - [`PositionMathError::InvalidPrice`] for a price outside the
///   representable range (zero is already rejected by [`Price`]).
/// - [`PositionMathError::InvalidToken`] if `base == quote`.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::{Decimals, Price, TickSpacing, TokenAddress};
/// use clmm_position_math::math::price_to_tick;
///
/// let base = TokenAddress::from_bytes([1u8; 20]);
/// let quote = TokenAddress::from_bytes([2u8; 20]);
/// let dec = Decimals::new(18).expect("valid");
/// let one = Price::from_u128(10u128.pow(18)).expect("positive");
///
/// let tick = price_to_tick(one, TickSpacing::MEDIUM, &base, &quote, dec).expect("valid");
/// assert_eq!(tick.get(), 0);
/// ```
pub fn price_to_tick(
    price: Price,
    tick_spacing: TickSpacing,
    base: &TokenAddress,
    quote: &TokenAddress,
    base_decimals: Decimals,
) -> crate::error::Result<Tick> {
    let sqrt = price_to_sqrt_price_x96(price, base, quote, base_decimals)?;
    let tick = sqrt_price_x96_to_tick(sqrt)?;
    Ok(tick_spacing.align_down(tick))
}

/// Rounds `tick` to the nearest multiple of `spacing` inside the usable
/// range.
#[must_use]
pub const fn nearest_usable_tick(tick: Tick, spacing: TickSpacing) -> Tick {
    spacing.nearest(tick)
}

/// Display-only conversion of a price to whole quote tokens.
#[must_use]
pub fn price_to_f64(price: Price, quote_decimals: Decimals) -> f64 {
    price.to_f64(quote_decimals)
}
