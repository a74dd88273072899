//! Concentrated liquidity position and its tick range.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Liquidity, Tick, TickSpacing};
use crate::error::PositionMathError;

/// Where a tick sits relative to a position's range.
///
/// The range is lower-inclusive and upper-exclusive, following the Uniswap
/// V3 convention: a pool at exactly `upper` holds only token1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangePhase {
    /// `tick < lower`: the position holds only token0.
    Below,
    /// `lower <= tick < upper`: the position holds both tokens.
    InRange,
    /// `tick >= upper`: the position holds only token1.
    Above,
}

/// A non-empty tick interval `[lower, upper)`.
///
/// # Invariants
///
/// - `lower < upper`.
/// - When built with [`aligned`](Self::aligned), both bounds are multiples
///   of the pool's tick spacing.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::{PositionRange, RangePhase, Tick, TickSpacing};
///
/// let lower = Tick::new(-120).expect("valid");
/// let upper = Tick::new(120).expect("valid");
/// let range = PositionRange::aligned(lower, upper, TickSpacing::MEDIUM).expect("aligned");
/// assert_eq!(range.phase(Tick::ZERO), RangePhase::InRange);
/// assert_eq!(range.phase(upper), RangePhase::Above);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr")]
pub struct PositionRange {
    lower: Tick,
    upper: Tick,
}

#[derive(Deserialize)]
struct RangeRepr {
    lower: Tick,
    upper: Tick,
}

impl TryFrom<RangeRepr> for PositionRange {
    type Error = PositionMathError;

    fn try_from(repr: RangeRepr) -> Result<Self, Self::Error> {
        Self::new(repr.lower, repr.upper)
    }
}

impl PositionRange {
    /// Creates a range, checking only the ordering of its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidRange`] if `lower >= upper`.
    pub const fn new(lower: Tick, upper: Tick) -> crate::error::Result<Self> {
        if lower.get() >= upper.get() {
            return Err(PositionMathError::InvalidRange(
                "lower tick must be less than upper tick",
            ));
        }
        Ok(Self { lower, upper })
    }

    /// Creates a range whose bounds must also be multiples of `spacing`.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidRange`] if the bounds are
    /// inverted, equal, or misaligned.
    pub const fn aligned(
        lower: Tick,
        upper: Tick,
        spacing: TickSpacing,
    ) -> crate::error::Result<Self> {
        if !spacing.is_aligned(lower) || !spacing.is_aligned(upper) {
            return Err(PositionMathError::InvalidRange(
                "range bounds must be multiples of the tick spacing",
            ));
        }
        Self::new(lower, upper)
    }

    /// Builds a range from raw tick indices.
    ///
    /// # Errors
    ///
    /// - [`PositionMathError::TickOutOfRange`] if either index is invalid.
    /// - [`PositionMathError::InvalidRange`] if `lower >= upper`.
    pub fn from_raw(lower: i32, upper: i32) -> crate::error::Result<Self> {
        Self::new(Tick::new(lower)?, Tick::new(upper)?)
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub const fn lower(&self) -> Tick {
        self.lower
    }

    /// Upper bound (exclusive).
    #[must_use]
    pub const fn upper(&self) -> Tick {
        self.upper
    }

    /// Width of the range in ticks.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.upper.get() - self.lower.get()
    }

    /// Classifies `tick` against the range.
    #[must_use]
    pub const fn phase(&self, tick: Tick) -> RangePhase {
        if tick.get() < self.lower.get() {
            RangePhase::Below
        } else if tick.get() < self.upper.get() {
            RangePhase::InRange
        } else {
            RangePhase::Above
        }
    }

    /// Returns `true` if `lower <= tick < upper`.
    #[must_use]
    pub const fn contains(&self, tick: Tick) -> bool {
        matches!(self.phase(tick), RangePhase::InRange)
    }
}

impl fmt::Display for PositionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower.get(), self.upper.get())
    }
}

/// A liquidity position: a tick range plus the liquidity deposited in it.
///
/// Zero liquidity is allowed; such a position is worth nothing at any price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    range: PositionRange,
    liquidity: Liquidity,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(range: PositionRange, liquidity: Liquidity) -> Self {
        Self { range, liquidity }
    }

    /// Returns the tick range.
    #[must_use]
    pub const fn range(&self) -> PositionRange {
        self.range
    }

    /// Returns the liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}, liquidity={})", self.range, self.liquidity)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tick(v: i32) -> Tick {
        let Ok(t) = Tick::new(v) else {
            panic!("valid tick expected");
        };
        t
    }

    fn range(lo: i32, hi: i32) -> PositionRange {
        let Ok(r) = PositionRange::new(tick(lo), tick(hi)) else {
            panic!("valid range expected");
        };
        r
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn inverted_or_empty_rejected() {
        assert!(PositionRange::new(tick(0), tick(0)).is_err());
        let Err(e) = PositionRange::new(tick(100), tick(-100)) else {
            panic!("expected Err");
        };
        assert!(matches!(e, PositionMathError::InvalidRange(_)));
    }

    #[test]
    fn aligned_requires_multiples() {
        assert!(PositionRange::aligned(tick(-120), tick(120), TickSpacing::MEDIUM).is_ok());
        let Err(e) = PositionRange::aligned(tick(-100), tick(120), TickSpacing::MEDIUM) else {
            panic!("expected Err");
        };
        assert!(matches!(e, PositionMathError::InvalidRange(_)));
    }

    #[test]
    fn from_raw_checks_tick_bounds() {
        let Err(e) = PositionRange::from_raw(-900_000, 0) else {
            panic!("expected Err");
        };
        assert_eq!(e, PositionMathError::TickOutOfRange(-900_000));
        assert_eq!(PositionRange::from_raw(-10, 10), Ok(range(-10, 10)));
    }

    // -- Phase ----------------------------------------------------------------

    #[test]
    fn phase_boundaries() {
        let r = range(-100, 100);
        assert_eq!(r.phase(tick(-101)), RangePhase::Below);
        assert_eq!(r.phase(tick(-100)), RangePhase::InRange);
        assert_eq!(r.phase(tick(99)), RangePhase::InRange);
        assert_eq!(r.phase(tick(100)), RangePhase::Above);
        assert!(r.contains(tick(0)));
        assert!(!r.contains(tick(100)));
    }

    #[test]
    fn width_and_display() {
        let r = range(-60, 120);
        assert_eq!(r.width(), 180);
        assert_eq!(r.to_string(), "[-60, 120)");
        let p = Position::new(r, Liquidity::new(500));
        assert_eq!(p.to_string(), "Position([-60, 120), liquidity=500)");
    }

    // -- Serde ----------------------------------------------------------------

    #[test]
    fn serde_rejects_inverted_range() {
        assert!(serde_json::from_str::<PositionRange>(r#"{"lower":10,"upper":-10}"#).is_err());
        let Ok(r) = serde_json::from_str::<PositionRange>(r#"{"lower":-10,"upper":10}"#) else {
            panic!("deserialize");
        };
        assert_eq!(r, range(-10, 10));
    }
}
