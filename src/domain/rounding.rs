//! Rounding direction for the 512-bit `mul_div` helpers.

use serde::{Deserialize, Serialize};

/// Direction applied when an exact quotient is not an integer.
///
/// Amount deltas derived from liquidity round [`Down`](Self::Down) when they
/// describe what a position holds, and [`Up`](Self::Up) when they describe
/// what must be deposited to mint it.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert_eq!(Rounding::default(), Rounding::Down);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rounding {
    /// Ceiling.
    Up,
    /// Floor.
    #[default]
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
