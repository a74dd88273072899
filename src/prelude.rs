//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use clmm_position_math::prelude::*;
//! ```

pub use crate::domain::{
    Decimals, Liquidity, PairOrientation, Position, PositionRange, Price, PriceRange, QuoteSide,
    RangePhase, SqrtPriceX96, Tick, TickSpacing, Token, TokenAddress, TokenAmounts, TokenPair,
};

pub use crate::traits::{CurveCache, FromConfig};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{CurveConfig, PoolSnapshot, PositionConfig};

pub use crate::analyzer::PositionAnalyzer;

pub use crate::apr::{EventKind, PnlBreakdown, PositionEvent, PositionPnl};

pub use crate::curve::InMemoryCurveCache;
pub use crate::curve::{CurveCacheKey, CurveData, CurvePoint, NoopCurveCache};

pub use crate::error::{PositionMathError, Result};
