//! Checked arithmetic trait for on-chain integer quantities.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic that
//! returns [`Result<Self, PositionMathError>`](crate::error::PositionMathError)
//! instead of wrapping or panicking. `alloy_primitives::U256` operators wrap
//! silently on overflow, so every ledger and valuation sum in this crate
//! goes through these methods instead.
//!
//! # Implementations
//!
//! - [`U256`]: token amounts, raw prices, values in quote units
//! - [`Liquidity`]: position liquidity (`u128`)
//!
//! # Examples
//!
//! ```
//! use alloy_primitives::U256;
//! use clmm_position_math::math::CheckedArithmetic;
//!
//! let a = U256::from(100u8);
//! assert_eq!(a.safe_add(&U256::from(1u8)), Ok(U256::from(101u8)));
//! assert!(U256::MAX.safe_add(&U256::from(1u8)).is_err());
//! ```

use alloy_primitives::U256;

use super::full_math::mul_div;
use crate::domain::{Liquidity, Rounding};
use crate::error::PositionMathError;

/// Fallible arithmetic for integer quantities.
///
/// # Contract
///
/// - **No panics**: every error condition produces `Err`.
/// - **No saturation**: overflow is reported, never clamped.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::Overflow`] if the result does not fit.
    fn safe_add(&self, other: &Self) -> Result<Self, PositionMathError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::Overflow`] if the result would be
    /// negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, PositionMathError>;

    /// Computes `self · numerator / denominator` with a wide intermediate.
    ///
    /// # Errors
    ///
    /// - [`PositionMathError::DivisionByZero`] if `denominator` is zero.
    /// - [`PositionMathError::Overflow`] if the result does not fit.
    fn safe_mul_div(
        &self,
        numerator: &Self,
        denominator: &Self,
        rounding: Rounding,
    ) -> Result<Self, PositionMathError>;
}

// ---------------------------------------------------------------------------
// U256
// ---------------------------------------------------------------------------

impl CheckedArithmetic for U256 {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, PositionMathError> {
        self.checked_add(*other)
            .ok_or(PositionMathError::Overflow("U256 addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, PositionMathError> {
        self.checked_sub(*other)
            .ok_or(PositionMathError::Overflow("U256 subtraction underflow"))
    }

    #[inline]
    fn safe_mul_div(
        &self,
        numerator: &Self,
        denominator: &Self,
        rounding: Rounding,
    ) -> Result<Self, PositionMathError> {
        mul_div(*self, *numerator, *denominator, rounding)
    }
}

// ---------------------------------------------------------------------------
// Liquidity
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, PositionMathError> {
        self.checked_add(other)
            .ok_or(PositionMathError::Overflow("liquidity addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, PositionMathError> {
        self.checked_sub(other)
            .ok_or(PositionMathError::Overflow("liquidity subtraction underflow"))
    }

    fn safe_mul_div(
        &self,
        numerator: &Self,
        denominator: &Self,
        rounding: Rounding,
    ) -> Result<Self, PositionMathError> {
        let wide = mul_div(
            self.to_u256(),
            numerator.to_u256(),
            denominator.to_u256(),
            rounding,
        )?;
        u128::try_from(wide)
            .map(Liquidity::new)
            .map_err(|_| PositionMathError::Overflow("liquidity mul_div overflow"))
    }
}
