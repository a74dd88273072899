//! Exact tick ↔ sqrt-price conversion for Uniswap V3-style pools.
//!
//! The relationship is `sqrtPriceX96 = sqrt(1.0001^tick) · 2^96`. Both
//! directions are pure integer arithmetic and reproduce the on-chain
//! `TickMath` library bit for bit, so ticks and sqrt prices computed here
//! can be compared directly with values read from a pool.
//!
//! # Functions
//!
//! - [`tick_to_sqrt_price_x96`]: `getSqrtRatioAtTick`.
//! - [`sqrt_price_x96_to_tick`]: the greatest tick whose sqrt price is
//!   `<=` the input.
//!
//! # Examples
//!
//! ```
//! use clmm_position_math::domain::{SqrtPriceX96, Tick};
//! use clmm_position_math::math::{sqrt_price_x96_to_tick, tick_to_sqrt_price_x96};
//!
//! let tick = Tick::new(100).expect("valid tick");
//! let sqrt = tick_to_sqrt_price_x96(tick).expect("valid tick produces valid sqrt price");
//! let round_trip = sqrt_price_x96_to_tick(sqrt).expect("valid sqrt price");
//! assert_eq!(round_trip, tick);
//! assert_eq!(tick_to_sqrt_price_x96(Tick::ZERO), Ok(SqrtPriceX96::ONE));
//! ```

use alloy_primitives::U256;

use crate::domain::{SqrtPriceX96, Tick, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};
use crate::error::PositionMathError;

/// `1 / sqrt(1.0001)` in Q128, the factor for bit 0 of `|tick|`.
const RATIO_BIT0: U256 = U256::from_limbs([0xaa2d_162d_1a59_4001, 0xfffc_b933_bd6f_ad37, 0, 0]);

/// `1 / sqrt(1.0001)^(2^i)` in Q128 for bits 1..=19 of `|tick|`.
const RATIO_TABLE: [(u32, U256); 19] = [
    (0x2, U256::from_limbs([0x59a4_6990_580e_213a, 0xfff9_7272_373d_4132, 0, 0])),
    (0x4, U256::from_limbs([0xef12_357c_f3c7_fdcc, 0xfff2_e50f_5f65_6932, 0, 0])),
    (0x8, U256::from_limbs([0x1c36_24ea_a094_1cd0, 0xffe5_caca_7e10_e4e6, 0, 0])),
    (0x10, U256::from_limbs([0xc9db_5883_5c92_6644, 0xffcb_9843_d60f_6159, 0, 0])),
    (0x20, U256::from_limbs([0x472e_6896_dfb2_54c0, 0xff97_3b41_fa98_c081, 0, 0])),
    (0x40, U256::from_limbs([0x43ec_78b3_26b5_2861, 0xff2e_a164_66c9_6a38, 0, 0])),
    (0x80, U256::from_limbs([0x11c4_61f1_969c_3053, 0xfe5d_ee04_6a99_a2a8, 0, 0])),
    (0x100, U256::from_limbs([0xdcff_c83b_479a_a3a4, 0xfcbe_86c7_900a_88ae, 0, 0])),
    (0x200, U256::from_limbs([0x6f2b_074c_f781_5e54, 0xf987_a725_3ac4_1317, 0, 0])),
    (0x400, U256::from_limbs([0x940c_7a39_8e4b_70f3, 0xf339_2b08_22b7_0005, 0, 0])),
    (0x800, U256::from_limbs([0x43b2_9c7f_a6e8_89d9, 0xe715_9475_a2c2_9b74, 0, 0])),
    (0x1000, U256::from_limbs([0x845a_d8f7_92aa_5825, 0xd097_f3bd_fd20_22b8, 0, 0])),
    (0x2000, U256::from_limbs([0x8a65_dc1f_90e0_61e5, 0xa9f7_4646_2d87_0fdf, 0, 0])),
    (0x4000, U256::from_limbs([0x90bb_3df6_2baf_32f7, 0x70d8_69a1_56d2_a1b8, 0, 0])),
    (0x8000, U256::from_limbs([0x8123_1505_542f_cfa6, 0x31be_135f_97d0_8fd9, 0, 0])),
    (0x10000, U256::from_limbs([0xc677_de54_f3e9_9bc9, 0x09aa_508b_5b7a_84e1, 0, 0])),
    (0x20000, U256::from_limbs([0x6699_c329_225e_e604, 0x005d_6af8_dedb_8119, 0, 0])),
    (0x40000, U256::from_limbs([0x1ea9_2604_1bed_fe98, 0x0000_2216_e584_f5fa, 0, 0])),
    (0x80000, U256::from_limbs([0x91f7_dc42_444e_8fa2, 0x0000_0000_048a_1703, 0, 0])),
];

/// Ticks per bit of `log2(sqrtPrice)`, scaled by 1000: `2 / log2(1.0001)`.
const TICKS_PER_BIT_MILLI: i64 = 13_863_637;

/// Computes `sqrt(1.0001^tick) · 2^96`, rounded up.
///
/// Bit-exact with the on-chain `getSqrtRatioAtTick`: the Q128 product of
/// per-bit factors is inverted for positive ticks, then shifted down to
/// Q96 rounding up.
///
/// # Errors
///
/// Returns [`PositionMathError::InvalidSqrtPrice`] only if the result
/// escapes the valid sqrt range, which cannot happen for a valid [`Tick`].
pub fn tick_to_sqrt_price_x96(tick: Tick) -> crate::error::Result<SqrtPriceX96> {
    SqrtPriceX96::new(sqrt_ratio_at_tick(tick.get()))
}

/// Raw `getSqrtRatioAtTick` for an already-validated tick index.
fn sqrt_ratio_at_tick(tick: i32) -> U256 {
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        RATIO_BIT0
    } else {
        U256::from(1u8) << 128
    };
    for (mask, factor) in RATIO_TABLE {
        if abs_tick & mask != 0 {
            // Both operands are < 2^128, so the product fits in 256 bits.
            ratio = (ratio * factor) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    let remainder_mask: U256 = (U256::from(1u8) << 32usize) - U256::from(1u8);
    let round_up = !(ratio & remainder_mask).is_zero();
    let shifted = ratio >> 32;
    if round_up {
        shifted + U256::from(1u8)
    } else {
        shifted
    }
}

/// Returns the greatest tick `t` with `tick_to_sqrt_price_x96(t) <= sqrt`.
///
/// The most significant bit of `sqrt` brackets `log_{1.0001}` to within a
/// few thousand ticks; a binary search over exact sqrt ratios then pins
/// the answer, so the result is never off by one.
///
/// # Errors
///
/// Infallible for a validated [`SqrtPriceX96`]; the `Result` carries any
/// tick construction failure.
pub fn sqrt_price_x96_to_tick(sqrt: SqrtPriceX96) -> crate::error::Result<Tick> {
    let x = sqrt.get();
    if x >= MAX_SQRT_RATIO {
        return Ok(Tick::MAX);
    }
    if x <= MIN_SQRT_RATIO {
        return Ok(Tick::MIN);
    }

    // Integer log2 relative to 2^96.
    let msb = i64::try_from(x.bit_len())
        .map_err(|_| PositionMathError::Overflow("sqrt price bit length"))?
        - 1;
    let k = msb - 96;
    let guess_lo = (k * TICKS_PER_BIT_MILLI).div_euclid(1000) - 8;
    let guess_hi = ((k + 1) * TICKS_PER_BIT_MILLI).div_euclid(1000) + 8;

    let (mut lo, mut hi) = (
        clamp_tick(guess_lo),
        clamp_tick(guess_hi),
    );
    if !(sqrt_ratio_at_tick(lo) <= x && sqrt_ratio_at_tick(hi) > x) {
        lo = MIN_TICK;
        hi = MAX_TICK;
    }

    // Invariant: ratio(lo) <= x < ratio(hi).
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if sqrt_ratio_at_tick(mid) <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Tick::new(lo)
}

fn clamp_tick(value: i64) -> i32 {
    let clamped = value.clamp(i64::from(MIN_TICK), i64::from(MAX_TICK));
    i32::try_from(clamped).unwrap_or(if clamped < 0 { MIN_TICK } else { MAX_TICK })
}
