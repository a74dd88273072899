//! Curve sample and curve summary types.

use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};

use crate::domain::{Price, PriceRange, RangePhase};

/// One sample of a position's PnL curve.
///
/// Values are raw quote units; `pnl` is signed because a position can be
/// worth less than it cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    price: Price,
    #[serde(with = "crate::serde_decimal")]
    position_value: U256,
    #[serde(with = "crate::serde_decimal")]
    pnl: I256,
    pnl_percent: f64,
    phase: RangePhase,
}

impl CurvePoint {
    pub(crate) const fn new(
        price: Price,
        position_value: U256,
        pnl: I256,
        pnl_percent: f64,
        phase: RangePhase,
    ) -> Self {
        Self {
            price,
            position_value,
            pnl,
            pnl_percent,
            phase,
        }
    }

    /// Sampled price.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Position value at [`price`](Self::price).
    #[must_use]
    pub const fn position_value(&self) -> U256 {
        self.position_value
    }

    /// `position_value − initial_value`.
    #[must_use]
    pub const fn pnl(&self) -> I256 {
        self.pnl
    }

    /// PnL as a percentage of the initial value (`0.0` when that is zero).
    #[must_use]
    pub const fn pnl_percent(&self) -> f64 {
        self.pnl_percent
    }

    /// Where the sample's tick sits relative to the position's range.
    #[must_use]
    pub const fn phase(&self) -> RangePhase {
        self.phase
    }
}

/// Smallest and largest PnL across a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PnlRange {
    #[serde(with = "crate::serde_decimal")]
    pub min: I256,
    #[serde(with = "crate::serde_decimal")]
    pub max: I256,
}

/// Indices of the first and last in-range samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeIndices {
    pub first: usize,
    pub last: usize,
}

/// A complete PnL curve plus the markers a chart needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveData {
    pub points: Vec<CurvePoint>,
    pub price_range: PriceRange,
    pub pnl_range: PnlRange,
    /// Sample closest to the pool's current price.
    pub current_price_index: usize,
    /// `None` when no sample falls inside the range.
    pub range_indices: Option<RangeIndices>,
    /// Price at the range's lower edge (the smaller of the two boundary
    /// prices, whichever tick produced it). Sampling at this price yields
    /// the boundary tick's phase.
    #[serde(with = "crate::serde_decimal")]
    pub lower_price: U256,
    /// Price at the range's upper edge.
    #[serde(with = "crate::serde_decimal")]
    pub upper_price: U256,
    pub current_price: Price,
    #[serde(with = "crate::serde_decimal")]
    pub initial_value: U256,
}

impl CurveData {
    /// The sample closest to the current price.
    #[must_use]
    pub fn current_point(&self) -> Option<&CurvePoint> {
        self.points.get(self.current_price_index)
    }
}
