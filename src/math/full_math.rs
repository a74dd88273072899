//! 512-bit intermediate arithmetic for 256-bit on-chain quantities.
//!
//! Products such as `liquidity · Δ√P` or `√P²` overflow 256 bits long
//! before their quotient does. Every helper here widens to [`U512`],
//! performs the exact operation, and narrows back with an explicit
//! overflow check.

use alloy_primitives::{U256, U512};

use crate::domain::Rounding;
use crate::error::PositionMathError;

/// Computes `a · b / denominator` without intermediate overflow.
///
/// # Errors
///
/// - [`PositionMathError::DivisionByZero`] if `denominator` is zero.
/// - [`PositionMathError::Overflow`] if the quotient exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use clmm_position_math::domain::Rounding;
/// use clmm_position_math::math::mul_div;
///
/// let big = U256::MAX;
/// let q = mul_div(big, U256::from(2u8), U256::from(4u8), Rounding::Down);
/// assert_eq!(q, Ok(big >> 1));
/// ```
pub fn mul_div(
    a: U256,
    b: U256,
    denominator: U256,
    rounding: Rounding,
) -> crate::error::Result<U256> {
    if denominator.is_zero() {
        return Err(PositionMathError::DivisionByZero);
    }
    let product = widen(a) * widen(b);
    let d = widen(denominator);
    let mut quotient = product / d;
    if rounding.is_up() && !(product % d).is_zero() {
        quotient += U512::from(1u8);
    }
    narrow(quotient, "mul_div result exceeds 256 bits")
}

/// Widens a 256-bit value to 512 bits.
#[inline]
#[must_use]
pub fn widen(value: U256) -> U512 {
    U512::from(value)
}

/// Narrows a 512-bit value back to 256 bits.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] with `context` if `value` does
/// not fit.
#[inline]
pub fn narrow(value: U512, context: &'static str) -> crate::error::Result<U256> {
    if value.bit_len() > 256 {
        return Err(PositionMathError::Overflow(context));
    }
    Ok(U256::from_limbs_slice(&value.as_limbs()[..4]))
}

/// Floor square root of a 512-bit integer (Newton's method).
#[must_use]
pub fn isqrt_u512(n: U512) -> U512 {
    if n.is_zero() {
        return U512::ZERO;
    }
    // 2^ceil(bits/2) is always >= sqrt(n), so the iteration descends.
    let mut x = U512::from(1u8) << n.bit_len().div_ceil(2);
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Floor square root of a 256-bit integer.
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    // sqrt of a 256-bit value has at most 128 bits.
    let root = isqrt_u512(widen(n));
    narrow(root, "isqrt").unwrap_or(U256::MAX)
}

/// Lossy conversion to `f64`, for display and percentage math only.
#[must_use]
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .enumerate()
        .map(|(i, limb)| {
            #[allow(clippy::cast_precision_loss)]
            let part = *limb as f64;
            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let exp = (64 * i) as i32;
            part * 2f64.powi(exp)
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn u(v: u128) -> U256 {
        U256::from(v)
    }

    // -- mul_div --------------------------------------------------------------

    #[test]
    fn mul_div_exact() {
        assert_eq!(mul_div(u(6), u(7), u(3), Rounding::Down), Ok(u(14)));
        assert_eq!(mul_div(u(6), u(7), u(3), Rounding::Up), Ok(u(14)));
    }

    #[test]
    fn mul_div_rounding() {
        assert_eq!(mul_div(u(10), u(1), u(3), Rounding::Down), Ok(u(3)));
        assert_eq!(mul_div(u(10), u(1), u(3), Rounding::Up), Ok(u(4)));
    }

    #[test]
    fn mul_div_wide_intermediate() {
        let q96 = U256::from(1u8) << 96;
        let a = U256::MAX;
        let Ok(r) = mul_div(a, q96, q96, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(r, a);
    }

    #[test]
    fn mul_div_errors() {
        assert_eq!(
            mul_div(u(1), u(1), U256::ZERO, Rounding::Down),
            Err(PositionMathError::DivisionByZero)
        );
        let Err(e) = mul_div(U256::MAX, u(2), u(1), Rounding::Down) else {
            panic!("expected Err");
        };
        assert!(matches!(e, PositionMathError::Overflow(_)));
    }

    #[test]
    fn mul_div_quotient_just_above_max() {
        // MAX * MAX / (MAX - 1) is slightly above MAX.
        let r = mul_div(U256::MAX, U256::MAX, U256::MAX - u(1), Rounding::Down);
        assert!(r.is_err());
    }

    // -- isqrt ----------------------------------------------------------------

    #[test]
    fn isqrt_small_values() {
        assert_eq!(isqrt(U256::ZERO), U256::ZERO);
        assert_eq!(isqrt(u(1)), u(1));
        assert_eq!(isqrt(u(3)), u(1));
        assert_eq!(isqrt(u(4)), u(2));
        assert_eq!(isqrt(u(99)), u(9));
        assert_eq!(isqrt(u(100)), u(10));
    }

    #[test]
    fn isqrt_powers_of_two() {
        let q192 = U256::from(1u8) << 192;
        assert_eq!(isqrt(q192), U256::from(1u8) << 96);
    }

    #[test]
    fn isqrt_max() {
        let r = isqrt(U256::MAX);
        assert_eq!(r, U256::from(u128::MAX));
    }

    #[test]
    fn isqrt_u512_beyond_256_bits() {
        let n = U512::from(1u8) << 400;
        assert_eq!(isqrt_u512(n), U512::from(1u8) << 200);
        let m = n - U512::from(1u8);
        assert_eq!(isqrt_u512(m), (U512::from(1u8) << 200) - U512::from(1u8));
    }

    // -- narrow ---------------------------------------------------------------

    #[test]
    fn narrow_keeps_values_that_fit() {
        assert_eq!(narrow(widen(U256::MAX), "max"), Ok(U256::MAX));
        assert_eq!(narrow(U512::from(7u8), "small"), Ok(u(7)));
    }

    #[test]
    fn narrow_rejects_bit_257() {
        let too_big = widen(U256::MAX) + U512::from(1u8);
        assert_eq!(
            narrow(too_big, "too big"),
            Err(PositionMathError::Overflow("too big"))
        );
    }

    // -- f64 ------------------------------------------------------------------

    #[test]
    fn to_f64_values() {
        assert!((u256_to_f64(u(12_345)) - 12_345.0).abs() < f64::EPSILON);
        let two_pow_100 = U256::from(1u8) << 100;
        assert!((u256_to_f64(two_pow_100) - 2f64.powi(100)).abs() < 1.0);
        assert!(u256_to_f64(U256::MAX) > 1e77);
    }
}
