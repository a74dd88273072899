//! Liquidity ↔ token-amount conversion for concentrated positions.
//!
//! For a range `[√a, √b]` and liquidity `L`:
//!
//! | Pool price | token0 | token1 |
//! |------------|--------|--------|
//! | `√P <= √a` | `L · (√b − √a) / (√a · √b)` | 0 |
//! | `√a < √P < √b` | `L · (√b − √P) / (√P · √b)` | `L · (√P − √a)` |
//! | `√P >= √b` | 0 | `L · (√b − √a)` |
//!
//! Sqrt prices are Q64.96, so the token0 formula shifts `L` left by 96
//! before dividing and the token1 formula divides by `2^96` at the end.
//! Every product goes through [`mul_div`] in 512-bit space.

use alloy_primitives::U256;

use super::full_math::mul_div;
use super::tick_math::tick_to_sqrt_price_x96;
use crate::domain::{Liquidity, PositionRange, Rounding, SqrtPriceX96, Tick, TokenAmounts, Q96};
use crate::error::PositionMathError;

/// Amount of token0 spanned by `liquidity` between two sqrt prices.
///
/// `((L << 96) · (√b − √a) / √b) / √a`, with the bounds sorted first.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if the amount exceeds 256 bits.
pub fn get_amount0_delta(
    sqrt_a: SqrtPriceX96,
    sqrt_b: SqrtPriceX96,
    liquidity: Liquidity,
    rounding: Rounding,
) -> crate::error::Result<U256> {
    let (lo, hi) = sorted(sqrt_a, sqrt_b);
    let numerator1 = liquidity.to_u256() << 96;
    let numerator2 = hi - lo;
    let scaled = mul_div(numerator1, numerator2, hi, rounding)?;
    let quotient = scaled / lo;
    if rounding.is_up() && !(scaled % lo).is_zero() {
        return quotient
            .checked_add(U256::from(1u8))
            .ok_or(PositionMathError::Overflow("amount0 rounding overflow"));
    }
    Ok(quotient)
}

/// Amount of token1 spanned by `liquidity` between two sqrt prices.
///
/// `L · (√b − √a) / 2^96`, with the bounds sorted first.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if the amount exceeds 256 bits.
pub fn get_amount1_delta(
    sqrt_a: SqrtPriceX96,
    sqrt_b: SqrtPriceX96,
    liquidity: Liquidity,
    rounding: Rounding,
) -> crate::error::Result<U256> {
    let (lo, hi) = sorted(sqrt_a, sqrt_b);
    mul_div(liquidity.to_u256(), hi - lo, Q96, rounding)
}

/// Token amounts held by a position at an arbitrary sqrt price.
///
/// The price is compared against the exact boundary sqrt prices, so the
/// result is continuous as `sqrt` moves across either boundary.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if an amount exceeds 256 bits.
pub fn get_token_amounts_at_sqrt_price(
    liquidity: Liquidity,
    sqrt: SqrtPriceX96,
    range: PositionRange,
) -> crate::error::Result<TokenAmounts> {
    let sqrt_lower = tick_to_sqrt_price_x96(range.lower())?;
    let sqrt_upper = tick_to_sqrt_price_x96(range.upper())?;

    if sqrt <= sqrt_lower {
        let amount0 = get_amount0_delta(sqrt_lower, sqrt_upper, liquidity, Rounding::Down)?;
        Ok(TokenAmounts::new(amount0, U256::ZERO))
    } else if sqrt < sqrt_upper {
        let amount0 = get_amount0_delta(sqrt, sqrt_upper, liquidity, Rounding::Down)?;
        let amount1 = get_amount1_delta(sqrt_lower, sqrt, liquidity, Rounding::Down)?;
        Ok(TokenAmounts::new(amount0, amount1))
    } else {
        let amount1 = get_amount1_delta(sqrt_lower, sqrt_upper, liquidity, Rounding::Down)?;
        Ok(TokenAmounts::new(U256::ZERO, amount1))
    }
}

/// Token amounts held by a position when the pool sits at `current_tick`.
///
/// - `current_tick < lower`: all token0.
/// - `current_tick >= upper`: all token1.
/// - otherwise: split at the tick's sqrt price.
///
/// Zero liquidity yields zero amounts.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if an amount exceeds 256 bits.
/// An inverted or empty range is already rejected by [`PositionRange`].
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::{Liquidity, PositionRange, Tick};
/// use clmm_position_math::math::get_token_amounts_from_liquidity;
///
/// let range = PositionRange::from_raw(-60, 60).expect("valid range");
/// let at_lower = get_token_amounts_from_liquidity(Liquidity::new(1_000_000), range.lower(), range)
///     .expect("amounts");
/// assert!(at_lower.token1().is_zero());
/// ```
pub fn get_token_amounts_from_liquidity(
    liquidity: Liquidity,
    current_tick: Tick,
    range: PositionRange,
) -> crate::error::Result<TokenAmounts> {
    let sqrt_lower = tick_to_sqrt_price_x96(range.lower())?;
    let sqrt_upper = tick_to_sqrt_price_x96(range.upper())?;

    if current_tick < range.lower() {
        let amount0 = get_amount0_delta(sqrt_lower, sqrt_upper, liquidity, Rounding::Down)?;
        Ok(TokenAmounts::new(amount0, U256::ZERO))
    } else if current_tick < range.upper() {
        let sqrt_current = tick_to_sqrt_price_x96(current_tick)?;
        let amount0 = get_amount0_delta(sqrt_current, sqrt_upper, liquidity, Rounding::Down)?;
        let amount1 = get_amount1_delta(sqrt_lower, sqrt_current, liquidity, Rounding::Down)?;
        Ok(TokenAmounts::new(amount0, amount1))
    } else {
        let amount1 = get_amount1_delta(sqrt_lower, sqrt_upper, liquidity, Rounding::Down)?;
        Ok(TokenAmounts::new(U256::ZERO, amount1))
    }
}

/// Liquidity provided by `amount0` of token0 across `[√a, √b]`.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if the result exceeds `u128`.
pub fn get_liquidity_for_amount0(
    sqrt_a: SqrtPriceX96,
    sqrt_b: SqrtPriceX96,
    amount0: U256,
) -> crate::error::Result<Liquidity> {
    let (lo, hi) = sorted(sqrt_a, sqrt_b);
    if lo == hi {
        return Err(PositionMathError::DivisionByZero);
    }
    let intermediate = mul_div(lo, hi, Q96, Rounding::Down)?;
    to_liquidity(mul_div(amount0, intermediate, hi - lo, Rounding::Down)?)
}

/// Liquidity provided by `amount1` of token1 across `[√a, √b]`.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if the result exceeds `u128`.
pub fn get_liquidity_for_amount1(
    sqrt_a: SqrtPriceX96,
    sqrt_b: SqrtPriceX96,
    amount1: U256,
) -> crate::error::Result<Liquidity> {
    let (lo, hi) = sorted(sqrt_a, sqrt_b);
    if lo == hi {
        return Err(PositionMathError::DivisionByZero);
    }
    to_liquidity(mul_div(amount1, Q96, hi - lo, Rounding::Down)?)
}

/// Maximum liquidity mintable from the given amounts at the current price.
///
/// In range, the binding side is whichever token yields less liquidity.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if the result exceeds `u128`.
pub fn get_liquidity_for_amounts(
    sqrt: SqrtPriceX96,
    range: PositionRange,
    amount0: U256,
    amount1: U256,
) -> crate::error::Result<Liquidity> {
    let sqrt_lower = tick_to_sqrt_price_x96(range.lower())?;
    let sqrt_upper = tick_to_sqrt_price_x96(range.upper())?;

    if sqrt <= sqrt_lower {
        get_liquidity_for_amount0(sqrt_lower, sqrt_upper, amount0)
    } else if sqrt < sqrt_upper {
        let l0 = get_liquidity_for_amount0(sqrt, sqrt_upper, amount0)?;
        let l1 = get_liquidity_for_amount1(sqrt_lower, sqrt, amount1)?;
        Ok(l0.min(l1))
    } else {
        get_liquidity_for_amount1(sqrt_lower, sqrt_upper, amount1)
    }
}

fn sorted(a: SqrtPriceX96, b: SqrtPriceX96) -> (U256, U256) {
    if a <= b {
        (a.get(), b.get())
    } else {
        (b.get(), a.get())
    }
}

fn to_liquidity(value: U256) -> crate::error::Result<Liquidity> {
    u128::try_from(value)
        .map(Liquidity::new)
        .map_err(|_| PositionMathError::Overflow("liquidity exceeds u128"))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

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

    fn sqrt(t: i32) -> SqrtPriceX96 {
        let Ok(s) = tick_to_sqrt_price_x96(tick(t)) else {
            panic!("valid sqrt");
        };
        s
    }

    fn amounts(l: u128, current: i32, r: PositionRange) -> TokenAmounts {
        let Ok(a) = get_token_amounts_from_liquidity(Liquidity::new(l), tick(current), r) else {
            panic!("expected Ok");
        };
        a
    }

    const L: u128 = 1_000_000_000_000_000_000;

    // -- Deltas ---------------------------------------------------------------

    #[test]
    fn deltas_are_order_independent() {
        let a = get_amount0_delta(sqrt(-60), sqrt(60), Liquidity::new(L), Rounding::Down);
        let b = get_amount0_delta(sqrt(60), sqrt(-60), Liquidity::new(L), Rounding::Down);
        assert_eq!(a, b);
        let c = get_amount1_delta(sqrt(-60), sqrt(60), Liquidity::new(L), Rounding::Down);
        let d = get_amount1_delta(sqrt(60), sqrt(-60), Liquidity::new(L), Rounding::Down);
        assert_eq!(c, d);
    }

    #[test]
    fn round_up_is_at_most_one_more() {
        let Ok(down) = get_amount0_delta(sqrt(0), sqrt(1), Liquidity::new(L), Rounding::Down)
        else {
            panic!("expected Ok");
        };
        let Ok(up) = get_amount0_delta(sqrt(0), sqrt(1), Liquidity::new(L), Rounding::Up) else {
            panic!("expected Ok");
        };
        assert!(up >= down);
        assert!(up - down <= U256::from(1u8));
    }

    #[test]
    fn known_amount1_over_one_tick() {
        // L · (sqrt(1) − sqrt(0)) / 2^96 with L = 1e18 ≈ 1e18 · 0.00005.
        let Ok(a1) = get_amount1_delta(sqrt(0), sqrt(1), Liquidity::new(L), Rounding::Down)
        else {
            panic!("expected Ok");
        };
        assert_eq!(a1, U256::from(49_998_750_062_496u128));
    }

    #[test]
    fn zero_width_delta_is_zero() {
        assert_eq!(
            get_amount1_delta(sqrt(5), sqrt(5), Liquidity::new(L), Rounding::Up),
            Ok(U256::ZERO)
        );
    }

    // -- Tick-based amounts ---------------------------------------------------

    #[test]
    fn below_range_all_token0() {
        let a = amounts(L, -1000, range(-600, 600));
        assert!(a.token0() > U256::ZERO);
        assert!(a.token1().is_zero());
    }

    #[test]
    fn above_range_all_token1() {
        let a = amounts(L, 1000, range(-600, 600));
        assert!(a.token0().is_zero());
        assert!(a.token1() > U256::ZERO);
    }

    #[test]
    fn in_range_both_tokens() {
        let a = amounts(L, 0, range(-600, 600));
        assert!(a.token0() > U256::ZERO);
        assert!(a.token1() > U256::ZERO);
    }

    #[test]
    fn boundary_conservation() {
        let r = range(-600, 600);
        assert!(amounts(L, -600, r).token1().is_zero());
        assert!(amounts(L, 600, r).token0().is_zero());
    }

    #[test]
    fn zero_liquidity_zero_amounts() {
        assert_eq!(amounts(0, 0, range(-600, 600)), TokenAmounts::ZERO);
    }

    #[test]
    fn narrow_range_above() {
        let a = amounts(L, 202_500, range(200_000, 201_000));
        assert!(a.token0().is_zero());
        assert!(a.token1() > U256::ZERO);
    }

    #[test]
    fn full_range_at_tick_zero_is_symmetric() {
        let a = amounts(L, 0, range(-887_220, 887_220));
        assert!(a.token0() > U256::ZERO);
        assert!(a.token1() > U256::ZERO);
        let diff = if a.token0() > a.token1() {
            a.token0() - a.token1()
        } else {
            a.token1() - a.token0()
        };
        assert!(diff <= U256::from(1u8));
    }

    // -- Sqrt-based amounts ---------------------------------------------------

    #[test]
    fn sqrt_based_matches_tick_based_at_tick_prices() {
        let r = range(-600, 600);
        for t in [-900, -600, -1, 0, 599, 600, 900] {
            let Ok(at_sqrt) = get_token_amounts_at_sqrt_price(Liquidity::new(L), sqrt(t), r) else {
                panic!("expected Ok");
            };
            assert_eq!(at_sqrt, amounts(L, t, r), "tick {t}");
        }
    }

    // -- Liquidity for amounts ------------------------------------------------

    #[test]
    fn liquidity_round_trip_is_conservative() {
        let r = range(-600, 600);
        let a = amounts(L, 0, r);
        let Ok(l) = get_liquidity_for_amounts(sqrt(0), r, a.token0(), a.token1()) else {
            panic!("expected Ok");
        };
        assert!(l.get() <= L);
        assert!(L - l.get() < L / 1_000_000);
    }

    #[test]
    fn single_sided_liquidity() {
        let r = range(-600, 600);
        let below = amounts(L, -1000, r);
        let Ok(l) = get_liquidity_for_amounts(sqrt(-1000), r, below.token0(), U256::ZERO) else {
            panic!("expected Ok");
        };
        assert!(L - l.get() < L / 1_000_000);
    }

    #[test]
    fn liquidity_for_equal_bounds_errors() {
        let r = get_liquidity_for_amount1(sqrt(0), sqrt(0), U256::from(1u8));
        assert_eq!(r, Err(PositionMathError::DivisionByZero));
    }
}
