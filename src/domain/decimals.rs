//! Token decimal places.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::PositionMathError;

/// Maximum supported decimal places.
const MAX_DECIMALS: u8 = 36;

/// Represents the number of decimal places for an ERC-20 token.
///
/// Valid range is `0..=36`. Most tokens use 18 (WETH) or 6 (USDC), but the
/// engine accepts anything whose `10^decimals` still leaves headroom in
/// 256-bit intermediates.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.get(), 6);
/// assert!(Decimals::new(37).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Maximum supported decimal places (36).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::DecimalsMismatch`] if `value` exceeds 36.
    pub const fn new(value: u8) -> Result<Self, PositionMathError> {
        if value > MAX_DECIMALS {
            return Err(PositionMathError::DecimalsMismatch(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^decimals` as a [`U256`].
    #[must_use]
    pub fn factor(&self) -> U256 {
        U256::from(10u8).pow(U256::from(self.0))
    }

    /// Converts raw units to a display-only `f64`.
    #[must_use]
    pub fn to_display(&self, raw: U256) -> f64 {
        crate::math::u256_to_f64(raw) / 10f64.powi(i32::from(self.0))
    }
}

impl TryFrom<u8> for Decimals {
    type Error = PositionMathError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(d: Decimals) -> Self {
        d.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn dec(v: u8) -> Decimals {
        let Ok(d) = Decimals::new(v) else {
            panic!("expected Ok");
        };
        d
    }

    #[test]
    fn valid_range() {
        assert_eq!(dec(0).get(), 0);
        assert_eq!(dec(6).get(), 6);
        assert_eq!(dec(18).get(), 18);
        assert_eq!(dec(36).get(), 36);
    }

    #[test]
    fn invalid_thirty_seven() {
        let Err(e) = Decimals::new(37) else {
            panic!("expected Err");
        };
        assert_eq!(e, PositionMathError::DecimalsMismatch(37));
    }

    #[test]
    fn invalid_max_u8() {
        assert!(Decimals::new(u8::MAX).is_err());
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Decimals::default(), Decimals::ZERO);
    }

    #[test]
    fn factor_values() {
        assert_eq!(dec(0).factor(), U256::from(1u8));
        assert_eq!(dec(6).factor(), U256::from(1_000_000u64));
        assert_eq!(dec(18).factor(), U256::from(1_000_000_000_000_000_000u128));
    }

    #[test]
    fn to_display() {
        let v = dec(6).to_display(U256::from(2_500_000u64));
        assert!((v - 2.5).abs() < 1e-12);
    }

    #[test]
    fn serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Decimals>("40").is_err());
        let Ok(d) = serde_json::from_str::<Decimals>("18") else {
            panic!("deserialize");
        };
        assert_eq!(d, dec(18));
    }
}
