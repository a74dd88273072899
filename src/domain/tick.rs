//! Discrete price points and tick spacing for concentrated liquidity.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PositionMathError;

/// Minimum valid tick index (Uniswap v3 standard).
pub const MIN_TICK: i32 = -887_272;

/// Maximum valid tick index (Uniswap v3 standard).
pub const MAX_TICK: i32 = 887_272;

/// A discrete price point in the concentrated liquidity model.
///
/// Follows the Uniswap v3 convention where price increases exponentially
/// with the tick index: `price = 1.0001^tick`. Valid tick indices range
/// from [`MIN`](Self::MIN) (`-887272`) to [`MAX`](Self::MAX) (`887272`).
///
/// Serialized as a plain JSON integer; deserialization re-validates the
/// range.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::Tick;
///
/// let tick = Tick::new(100);
/// assert!(tick.is_ok());
/// assert_eq!(tick.unwrap_or(Tick::ZERO).get(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Tick(i32);

impl Tick {
    /// Minimum valid tick (`-887272`).
    pub const MIN: Self = Self(MIN_TICK);

    /// Maximum valid tick (`887272`).
    pub const MAX: Self = Self(MAX_TICK);

    /// Neutral tick where `price = 1.0001^0 = 1.0`.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Tick` with range validation.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::TickOutOfRange`] if `value` is outside
    /// the range `[-887272, 887272]`.
    pub const fn new(value: i32) -> crate::error::Result<Self> {
        if value < MIN_TICK || value > MAX_TICK {
            return Err(PositionMathError::TickOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `i32` tick index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Checked addition of a delta to this tick.
    ///
    /// Returns `None` if the result would be outside the valid tick range.
    #[must_use]
    pub const fn checked_add(&self, delta: i32) -> Option<Self> {
        match self.0.checked_add(delta) {
            Some(v) if v >= MIN_TICK && v <= MAX_TICK => Some(Self(v)),
            _ => None,
        }
    }

    /// Checked subtraction of a delta from this tick.
    ///
    /// Returns `None` if the result would be outside the valid tick range.
    #[must_use]
    pub const fn checked_sub(&self, delta: i32) -> Option<Self> {
        match self.0.checked_sub(delta) {
            Some(v) if v >= MIN_TICK && v <= MAX_TICK => Some(Self(v)),
            _ => None,
        }
    }
}

impl TryFrom<i32> for Tick {
    type Error = PositionMathError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tick> for i32 {
    fn from(tick: Tick) -> Self {
        tick.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tick({})", self.0)
    }
}

/// Granularity of initializable ticks in a pool.
///
/// Position boundaries must be multiples of the spacing. Standard Uniswap
/// v3 fee tiers use spacings of 1, 10, 60 and 200.
///
/// # Rounding
///
/// [`align_down`](Self::align_down) rounds toward negative infinity, the
/// same direction the protocol uses, so a price selected between two
/// usable ticks always snaps to the lower one.
///
/// # Examples
///
/// ```
/// use clmm_position_math::domain::{Tick, TickSpacing};
///
/// let spacing = TickSpacing::new(60).expect("non-zero");
/// let t = Tick::new(-61).expect("in range");
/// assert_eq!(spacing.align_down(t).get(), -120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TickSpacing(u32);

impl TickSpacing {
    /// Spacing for the 0.01% fee tier.
    pub const LOWEST: Self = Self(1);
    /// Spacing for the 0.05% fee tier.
    pub const LOW: Self = Self(10);
    /// Spacing for the 0.30% fee tier.
    pub const MEDIUM: Self = Self(60);
    /// Spacing for the 1.00% fee tier.
    pub const HIGH: Self = Self(200);

    /// Creates a validated tick spacing.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidConfiguration`] if `value` is
    /// zero or larger than the tick range.
    pub const fn new(value: u32) -> crate::error::Result<Self> {
        if value == 0 {
            return Err(PositionMathError::InvalidConfiguration(
                "tick spacing must be greater than zero",
            ));
        }
        if value > MAX_TICK as u32 {
            return Err(PositionMathError::InvalidConfiguration(
                "tick spacing exceeds the tick range",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw spacing.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if `tick` is a multiple of this spacing.
    #[must_use]
    pub const fn is_aligned(&self, tick: Tick) -> bool {
        tick.get() % (self.0 as i32) == 0
    }

    /// Smallest usable (aligned) tick.
    #[must_use]
    pub const fn min_usable_tick(&self) -> Tick {
        let s = self.0 as i32;
        Tick((MIN_TICK / s) * s)
    }

    /// Largest usable (aligned) tick.
    #[must_use]
    pub const fn max_usable_tick(&self) -> Tick {
        let s = self.0 as i32;
        Tick((MAX_TICK / s) * s)
    }

    /// Rounds `tick` toward negative infinity to a multiple of the spacing.
    ///
    /// Results below [`min_usable_tick`](Self::min_usable_tick) are clamped
    /// up to it, so the returned tick is always valid and aligned.
    #[must_use]
    pub const fn align_down(&self, tick: Tick) -> Tick {
        let s = self.0 as i32;
        let aligned = tick.get().div_euclid(s) * s;
        if aligned < MIN_TICK {
            self.min_usable_tick()
        } else {
            Tick(aligned)
        }
    }

    /// Rounds `tick` to the nearest multiple of the spacing, clamped to the
    /// usable range. Ties round up.
    #[must_use]
    pub const fn nearest(&self, tick: Tick) -> Tick {
        let s = self.0 as i32;
        let down = tick.get().div_euclid(s) * s;
        let rounded = if tick.get() - down >= (s + 1) / 2 {
            down + s
        } else {
            down
        };
        let min = self.min_usable_tick().get();
        let max = self.max_usable_tick().get();
        if rounded < min {
            Tick(min)
        } else if rounded > max {
            Tick(max)
        } else {
            Tick(rounded)
        }
    }
}

impl TryFrom<u32> for TickSpacing {
    type Error = PositionMathError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TickSpacing> for u32 {
    fn from(spacing: TickSpacing) -> Self {
        spacing.0
    }
}

impl fmt::Display for TickSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
