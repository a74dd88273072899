//! PnL curves: a position's value and profit sampled across a price window.
//!
//! [`build_curve_data`] is the entry point for charts. It samples the
//! position with [`generate_pnl_curve`] and adds the markers a renderer
//! needs: the PnL extremes, the sample nearest the pool price and the
//! in-range span. [`cached_curve_data`] wraps any build behind a
//! [`CurveCache`](crate::traits::CurveCache).

mod cache;
mod generator;
mod point;

pub use cache::InMemoryCurveCache;
pub use cache::{cached_curve_data, CurveCacheKey, NoopCurveCache};
pub use generator::{
    build_curve_data, default_price_range, generate_pnl_curve, pnl_percent, range_boundary_prices,
    representable_price_range,
};
pub use point::{CurveData, CurvePoint, PnlRange, RangeIndices};
