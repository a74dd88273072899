//! Property-based tests for the position math.
//!
//! 1. **Tick round-trip**: `tick(sqrt_at(t)) == t` for every valid tick.
//! 2. **Sqrt monotonicity**: `sqrt_at(t) < sqrt_at(t + 1)`.
//! 3. **Boundary conservation**: a position holds only token0 at or below
//!    its range and only token1 at or above it.
//! 4. **Liquidity round-trip**: re-deriving liquidity from a position's
//!    amounts never yields more than it started with.
//! 5. **Value continuity**: one raw unit of price moves the value by at
//!    most its first-order change plus rounding, even across a boundary.
//! 6. **Curve bounds**: first and last curve samples are exactly the window
//!    bounds.

use alloy_primitives::U256;
use proptest::prelude::*;

use super::{
    get_liquidity_for_amounts, get_token_amounts_at_sqrt_price, sqrt_price_x96_to_raw_price,
    sqrt_price_x96_to_tick, tick_to_sqrt_price_x96,
};
use crate::curve::generate_pnl_curve;
use crate::domain::{
    Decimals, Liquidity, PairOrientation, Position, PositionRange, Price, PriceRange, Tick,
    TickSpacing, Token, TokenAddress, MAX_TICK, MIN_TICK,
};
use crate::valuation::calculate_position_value_at_price;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

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

fn sqrt_at(t: i32) -> crate::domain::SqrtPriceX96 {
    let Ok(s) = tick_to_sqrt_price_x96(tick(t)) else {
        panic!("valid sqrt");
    };
    s
}

// Two 18-decimal tokens, base is token0.
fn orientation() -> PairOrientation {
    let Ok(d) = Decimals::new(18) else {
        panic!("valid decimals");
    };
    let base = Token::new(TokenAddress::from_bytes([1u8; 20]), d);
    let quote = Token::new(TokenAddress::from_bytes([2u8; 20]), d);
    let Ok(o) = PairOrientation::new(base, quote) else {
        panic!("valid orientation");
    };
    o
}

fn value(liquidity: u128, r: PositionRange, raw_price: U256) -> U256 {
    let Ok(price) = Price::new(raw_price) else {
        panic!("positive price");
    };
    let Ok(v) = calculate_position_value_at_price(
        Liquidity::new(liquidity),
        r,
        price,
        &orientation(),
        TickSpacing::MEDIUM,
    ) else {
        panic!("valuation succeeds");
    };
    v
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn tick_round_trip(t in MIN_TICK..=MAX_TICK) {
        let Ok(back) = sqrt_price_x96_to_tick(sqrt_at(t)) else {
            panic!("round trip succeeds");
        };
        prop_assert_eq!(back.get(), t);
    }

    #[test]
    fn sqrt_strictly_increasing(t in MIN_TICK..MAX_TICK) {
        prop_assert!(sqrt_at(t) < sqrt_at(t + 1));
    }

    #[test]
    fn boundary_conservation(
        lo in -14_000i32..13_000,
        width in 1i32..500,
        liquidity in 1u128..=u128::MAX,
    ) {
        let (lo, hi) = (lo * 60, (lo + width) * 60);
        let r = range(lo, hi);
        let l = Liquidity::new(liquidity);

        let Ok(at_lower) = get_token_amounts_at_sqrt_price(l, sqrt_at(lo), r) else {
            panic!("expected Ok");
        };
        prop_assert!(at_lower.token1().is_zero());

        let Ok(at_upper) = get_token_amounts_at_sqrt_price(l, sqrt_at(hi), r) else {
            panic!("expected Ok");
        };
        prop_assert!(at_upper.token0().is_zero());
    }

    #[test]
    fn liquidity_round_trip_never_grows(
        lo in -14_000i32..13_000,
        width in 1i32..500,
        offset in -1_000i32..1_000,
        liquidity in 1u128..(1u128 << 100),
    ) {
        let (lo, hi) = (lo * 60, (lo + width) * 60);
        let r = range(lo, hi);
        let sqrt = sqrt_at((lo + offset).clamp(MIN_TICK, MAX_TICK));
        let Ok(amounts) = get_token_amounts_at_sqrt_price(Liquidity::new(liquidity), sqrt, r) else {
            panic!("expected Ok");
        };
        let Ok(back) = get_liquidity_for_amounts(sqrt, r, amounts.token0(), amounts.token1()) else {
            panic!("expected Ok");
        };
        prop_assert!(back.get() <= liquidity);
    }

    #[test]
    fn value_continuous_at_boundaries(
        lo in -800i32..800,
        width in 1i32..30,
        liquidity in 1_000_000_000_000u128..100_000_000_000_000_000_000,
        upper_edge in any::<bool>(),
    ) {
        let (lo, hi) = (lo * 60, (lo + width) * 60);
        let r = range(lo, hi);
        let o = orientation();
        let edge = if upper_edge { hi } else { lo };
        let Ok(p) = sqrt_price_x96_to_raw_price(
            sqrt_at(edge),
            &o.base().address(),
            &o.quote().address(),
            o.base().decimals(),
        ) else {
            panic!("expected Ok");
        };
        let next = p + U256::from(1u8);
        let (v1, v2) = (value(liquidity, r, p), value(liquidity, r, next));
        let diff = if v1 > v2 { v1 - v2 } else { v2 - v1 };
        // dV/dp is the base amount, and base · p / 10^18 <= V.
        let bound = v1.max(v2) / p + p / U256::from(10u64.pow(18)) + U256::from(3u8);
        prop_assert!(diff <= bound, "diff {} > bound {}", diff, bound);
    }

    #[test]
    fn curve_bounds_exact(
        min in 1u128..1_000_000_000_000_000_000_000,
        span in 1u128..1_000_000_000_000_000_000_000,
        samples in 2usize..40,
    ) {
        let (Ok(lo), Ok(hi)) = (Price::from_u128(min), Price::from_u128(min + span)) else {
            panic!("positive prices");
        };
        let Ok(window) = PriceRange::new(lo, hi) else {
            panic!("ordered window");
        };
        let position = Position::new(range(-600, 600), Liquidity::new(1_000_000));
        let Ok(points) = generate_pnl_curve(
            &position,
            U256::ZERO,
            &orientation(),
            TickSpacing::MEDIUM,
            window,
            samples,
        ) else {
            panic!("curve generation succeeds");
        };
        prop_assert_eq!(points.len(), samples);
        prop_assert_eq!(points[0].price(), lo);
        prop_assert_eq!(points[samples - 1].price(), hi);
        prop_assert!(points.windows(2).all(|w| w[0].price() <= w[1].price()));
    }
}
