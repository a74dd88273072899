//! Value of a liquidity position at a live or hypothetical price.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Liquidity, PairOrientation, Position, PositionRange, Price, RangePhase, Rounding,
    SqrtPriceX96, Tick, TickSpacing, TokenAmounts,
};
use crate::error::PositionMathError;
use crate::math::{
    get_token_amounts_at_sqrt_price, price_to_sqrt_price_x96, sqrt_price_x96_to_price,
    sqrt_price_x96_to_tick, CheckedArithmetic,
};

/// Per-token contributions to a position's value, in raw quote units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteValue {
    #[serde(with = "crate::serde_decimal")]
    base_in_quote: U256,
    #[serde(with = "crate::serde_decimal")]
    quote: U256,
}

impl QuoteValue {
    /// Value of the base-token holding, converted at the given price.
    #[must_use]
    pub const fn base_in_quote(&self) -> U256 {
        self.base_in_quote
    }

    /// Quote-token holding, already in quote units.
    #[must_use]
    pub const fn quote(&self) -> U256 {
        self.quote
    }

    /// Sum of both contributions.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::Overflow`] if the sum exceeds 256 bits.
    pub fn total(&self) -> Result<U256, PositionMathError> {
        self.base_in_quote.safe_add(&self.quote)
    }
}

/// Everything derived while valuing a position at one price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    tick: Tick,
    phase: RangePhase,
    amounts: TokenAmounts,
    #[serde(with = "crate::serde_decimal")]
    value: U256,
}

impl Valuation {
    /// Pool tick corresponding to the price, aligned down to the spacing.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    /// Position of [`tick`](Self::tick) relative to the range.
    #[must_use]
    pub const fn phase(&self) -> RangePhase {
        self.phase
    }

    /// Token amounts held at the price.
    #[must_use]
    pub const fn amounts(&self) -> TokenAmounts {
        self.amounts
    }

    /// Total value in raw quote units.
    #[must_use]
    pub const fn value(&self) -> U256 {
        self.value
    }
}

/// Converts token amounts into quote units at `price`.
///
/// The base amount is worth `base_amount · price / 10^base_decimals`
/// (floored); the quote amount is taken as is.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if the conversion exceeds 256
/// bits.
pub fn token_amounts_in_quote(
    amounts: TokenAmounts,
    price: Price,
    orientation: &PairOrientation,
) -> Result<QuoteValue, PositionMathError> {
    let (base_amount, quote_amount) = amounts.split(orientation.base_is_token0());
    let base_in_quote = base_amount.safe_mul_div(
        &price.get(),
        &orientation.base().decimals().factor(),
        Rounding::Down,
    )?;
    Ok(QuoteValue {
        base_in_quote,
        quote: quote_amount,
    })
}

/// Values a position at a hypothetical price and reports how it got there.
///
/// # Errors
///
/// - [`PositionMathError::InvalidRange`] if the range is not aligned to
///   `tick_spacing`.
/// - [`PositionMathError::InvalidPrice`] if the price cannot be expressed
///   as a pool sqrt price.
/// - [`PositionMathError::Overflow`] on arithmetic overflow.
pub fn value_at_price(
    position: &Position,
    price: Price,
    orientation: &PairOrientation,
    tick_spacing: TickSpacing,
) -> Result<Valuation, PositionMathError> {
    let range = position.range();
    PositionRange::aligned(range.lower(), range.upper(), tick_spacing)?;

    let base = orientation.base().address();
    let quote = orientation.quote().address();
    let base_decimals = orientation.base().decimals();

    let sqrt = price_to_sqrt_price_x96(price, &base, &quote, base_decimals)?;
    let tick = tick_spacing.align_down(sqrt_price_x96_to_tick(sqrt)?);
    let amounts = get_token_amounts_at_sqrt_price(position.liquidity(), sqrt, range)?;
    let value = token_amounts_in_quote(amounts, price, orientation)?.total()?;

    Ok(Valuation {
        tick,
        phase: range.phase(tick),
        amounts,
        value,
    })
}

/// Total value, in raw quote units, of `liquidity` over
/// `[tick_lower, tick_upper)` if the pool traded at `hypothetical_price`.
///
/// # Errors
///
/// See [`value_at_price`].
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::{
///     Decimals, Liquidity, PairOrientation, PositionRange, Price, TickSpacing, Token,
///     TokenAddress,
/// };
/// use clmm_position_math::valuation::calculate_position_value_at_price;
///
/// let weth = Token::new(TokenAddress::from_bytes([1u8; 20]), Decimals::new(18).expect("valid"));
/// let usdc = Token::new(TokenAddress::from_bytes([2u8; 20]), Decimals::new(6).expect("valid"));
/// let orientation = PairOrientation::new(weth, usdc).expect("distinct");
///
/// let range = PositionRange::from_raw(-600, 600).expect("valid");
/// let price = Price::from_u128(10u128.pow(18)).expect("positive");
/// let value = calculate_position_value_at_price(
///     Liquidity::new(10u128.pow(18)),
///     range,
///     price,
///     &orientation,
///     TickSpacing::MEDIUM,
/// )
/// .expect("valid inputs");
/// assert!(!value.is_zero());
/// ```
pub fn calculate_position_value_at_price(
    liquidity: Liquidity,
    range: PositionRange,
    hypothetical_price: Price,
    orientation: &PairOrientation,
    tick_spacing: TickSpacing,
) -> Result<U256, PositionMathError> {
    let position = Position::new(range, liquidity);
    value_at_price(&position, hypothetical_price, orientation, tick_spacing).map(|v| v.value())
}

/// Value of a position at the pool's live sqrt price.
///
/// Amounts come straight from `sqrt`; the base amount is converted with
/// the price implied by that same sqrt.
///
/// # Errors
///
/// - [`PositionMathError::InvalidPrice`] if the pool price floors to zero
///   quote units per base token.
/// - [`PositionMathError::Overflow`] on arithmetic overflow.
pub fn calculate_position_value(
    position: &Position,
    sqrt: SqrtPriceX96,
    orientation: &PairOrientation,
) -> Result<U256, PositionMathError> {
    let price = sqrt_price_x96_to_price(
        sqrt,
        &orientation.base().address(),
        &orientation.quote().address(),
        orientation.base().decimals(),
    )?;
    let amounts = get_token_amounts_at_sqrt_price(position.liquidity(), sqrt, position.range())?;
    token_amounts_in_quote(amounts, price, orientation)?.total()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimals, Token, TokenAddress};
    use crate::math::{get_token_amounts_from_liquidity, tick_to_price, tick_to_sqrt_price_x96};

    const L: u128 = 1_000_000_000_000_000_000;

    fn token(byte: u8, decimals: u8) -> Token {
        let Ok(d) = Decimals::new(decimals) else {
            panic!("valid decimals");
        };
        Token::new(TokenAddress::from_bytes([byte; 20]), d)
    }

    /// WETH (18) as token0/base, USDC (6) as token1/quote.
    fn weth_usdc() -> PairOrientation {
        let Ok(o) = PairOrientation::new(token(1, 18), token(2, 6)) else {
            panic!("valid orientation");
        };
        o
    }

    fn tick(v: i32) -> Tick {
        let Ok(t) = Tick::new(v) else {
            panic!("valid tick");
        };
        t
    }

    fn range(lo: i32, hi: i32) -> PositionRange {
        let Ok(r) = PositionRange::from_raw(lo, hi) else {
            panic!("valid range");
        };
        r
    }

    fn price(v: u128) -> Price {
        let Ok(p) = Price::from_u128(v) else {
            panic!("valid price");
        };
        p
    }

    fn value(r: PositionRange, p: Price) -> U256 {
        let Ok(v) =
            calculate_position_value_at_price(Liquidity::new(L), r, p, &weth_usdc(), TickSpacing::MEDIUM)
        else {
            panic!("expected Ok");
        };
        v
    }

    // -- token_amounts_in_quote -----------------------------------------------

    #[test]
    fn base_amount_converted_with_price() {
        let amounts = TokenAmounts::new(U256::from(2 * 10u128.pow(18)), U256::from(5u8));
        let Ok(q) = token_amounts_in_quote(amounts, price(2_500_000_000), &weth_usdc()) else {
            panic!("expected Ok");
        };
        assert_eq!(q.base_in_quote(), U256::from(5_000_000_000u64));
        assert_eq!(q.quote(), U256::from(5u8));
        assert_eq!(q.total(), Ok(U256::from(5_000_000_005u64)));
    }

    #[test]
    fn base_token1_uses_token1_amount() {
        let Ok(o) = PairOrientation::new(token(2, 6), token(1, 18)) else {
            panic!("valid orientation");
        };
        let amounts = TokenAmounts::new(U256::from(7u8), U256::from(3_000_000u32));
        let Ok(q) = token_amounts_in_quote(amounts, price(10), &o) else {
            panic!("expected Ok");
        };
        // 3 whole base tokens at 10 raw quote units each, plus 7 raw quote.
        assert_eq!(q.base_in_quote(), U256::from(30u8));
        assert_eq!(q.quote(), U256::from(7u8));
    }

    // -- value_at_price -------------------------------------------------------

    #[test]
    fn unit_price_value_equals_amount_sum() {
        let r = range(-887_220, 887_220);
        let Ok(amounts) = get_token_amounts_from_liquidity(Liquidity::new(L), Tick::ZERO, r) else {
            panic!("expected Ok");
        };
        let v = value(r, price(10u128.pow(18)));
        let Ok(expected) = amounts.token0().safe_add(&amounts.token1()) else {
            panic!("no overflow");
        };
        assert_eq!(v, expected);
    }

    #[test]
    fn phase_reported_from_price() {
        let position = Position::new(range(-600, 600), Liquidity::new(L));
        let o = weth_usdc();
        let cases = [
            (10u128.pow(17), RangePhase::Below),
            (10u128.pow(18), RangePhase::InRange),
            (10u128.pow(19), RangePhase::Above),
        ];
        for (raw, expected) in cases {
            let Ok(v) = value_at_price(&position, price(raw), &o, TickSpacing::MEDIUM) else {
                panic!("expected Ok");
            };
            assert_eq!(v.phase(), expected, "price {raw}");
        }
    }

    #[test]
    fn below_range_holds_only_base() {
        let position = Position::new(range(-600, 600), Liquidity::new(L));
        let Ok(v) = value_at_price(&position, price(10u128.pow(17)), &weth_usdc(), TickSpacing::MEDIUM)
        else {
            panic!("expected Ok");
        };
        assert!(v.amounts().token1().is_zero());
        assert!(v.tick().get() < -600);
    }

    #[test]
    fn misaligned_range_rejected() {
        let r = calculate_position_value_at_price(
            Liquidity::new(L),
            range(-100, 600),
            price(10u128.pow(18)),
            &weth_usdc(),
            TickSpacing::MEDIUM,
        );
        assert!(matches!(r, Err(PositionMathError::InvalidRange(_))));
    }

    #[test]
    fn zero_liquidity_worth_nothing() {
        let Ok(v) = calculate_position_value_at_price(
            Liquidity::ZERO,
            range(-600, 600),
            price(10u128.pow(18)),
            &weth_usdc(),
            TickSpacing::MEDIUM,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(v, U256::ZERO);
    }

    fn boundary_price(t: i32) -> u128 {
        let o = weth_usdc();
        let Ok(p) = tick_to_price(tick(t), &o.base().address(), &o.quote().address(), o.base().decimals())
        else {
            panic!("expected Ok");
        };
        let Ok(raw) = u128::try_from(p.get()) else {
            panic!("fits u128");
        };
        raw
    }

    #[test]
    fn continuous_across_range_boundaries() {
        let r = range(-600, 600);
        for t in [-600, 600] {
            let b = boundary_price(t);
            let below = value(r, price(b - 1));
            let above = value(r, price(b + 1));
            assert!(above >= below, "value fell across tick {t}");
            assert!(above - below <= U256::from(1u8), "jump of {} at tick {t}", above - below);
        }
    }

    // -- calculate_position_value ---------------------------------------------

    #[test]
    fn live_value_matches_hypothetical_at_same_price() {
        let r = range(-600, 600);
        let position = Position::new(r, Liquidity::new(L));
        let Ok(sqrt) = tick_to_sqrt_price_x96(Tick::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(live) = calculate_position_value(&position, sqrt, &weth_usdc()) else {
            panic!("expected Ok");
        };
        assert_eq!(live, value(r, price(10u128.pow(18))));
    }
}
