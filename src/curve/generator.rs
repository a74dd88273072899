//! PnL curve sampling.

use alloy_primitives::{I256, U256};
use tracing::{debug, trace};

use super::point::{CurveData, CurvePoint, PnlRange, RangeIndices};
use crate::config::CurveConfig;
use crate::domain::{
    PairOrientation, Position, Price, PriceRange, RangePhase, Rounding, Tick, TickSpacing,
};
use crate::error::PositionMathError;
use crate::math::{
    mul_div, price_to_sqrt_price_x96, sqrt_price_x96_to_raw_price, tick_to_sqrt_price_x96,
    u256_to_f64, CheckedArithmetic,
};
use crate::valuation::value_at_price;

/// Resolution of [`CurvePoint::pnl_percent`]: 1e-4 percent.
const PERCENT_SCALE: u64 = 1_000_000;

/// Samples a position's PnL at `sample_count` prices evenly spaced across
/// `price_range`.
///
/// Sample `i` sits at `min + (max − min) · i / (sample_count − 1)`, computed
/// in integer space, so the first and last samples are exactly the range
/// bounds. Values are not monotonic in price in general: a position's
/// value flattens once the price leaves its range.
///
/// # Errors
///
/// - [`PositionMathError::InvalidConfiguration`] if `sample_count < 2`.
/// - Any error from [`value_at_price`] (misaligned range, unrepresentable
///   price, overflow).
pub fn generate_pnl_curve(
    position: &Position,
    initial_value: U256,
    orientation: &PairOrientation,
    tick_spacing: TickSpacing,
    price_range: PriceRange,
    sample_count: usize,
) -> Result<Vec<CurvePoint>, PositionMathError> {
    if sample_count < 2 {
        return Err(PositionMathError::InvalidConfiguration(
            "curve needs at least two samples",
        ));
    }
    let min = price_range.min().get();
    let span = price_range.max().get().safe_sub(&min)?;
    let steps = U256::from(sample_count - 1);
    let initial = to_signed(initial_value)?;

    let mut points = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        let offset = mul_div(span, U256::from(i), steps, Rounding::Down)?;
        let price = Price::new(min.safe_add(&offset)?)?;
        let valuation = value_at_price(position, price, orientation, tick_spacing)?;
        let value = valuation.value();
        let pnl = to_signed(value)?
            .checked_sub(initial)
            .ok_or(PositionMathError::Overflow("pnl underflow"))?;
        trace!(index = i, %price, %value, "curve sample");
        points.push(CurvePoint::new(
            price,
            value,
            pnl,
            pnl_percent(pnl, initial_value)?,
            valuation.phase(),
        ));
    }
    Ok(points)
}

/// `pnl / initial · 100`, rounded toward zero at 1e-4 percent.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] on arithmetic overflow.
pub fn pnl_percent(pnl: I256, initial_value: U256) -> Result<f64, PositionMathError> {
    if initial_value.is_zero() {
        return Ok(0.0);
    }
    let scaled = mul_div(
        pnl.unsigned_abs(),
        U256::from(PERCENT_SCALE),
        initial_value,
        Rounding::Down,
    )?;
    #[allow(clippy::cast_precision_loss)]
    let magnitude = u256_to_f64(scaled) / (PERCENT_SCALE as f64 / 100.0);
    Ok(if pnl.is_negative() { -magnitude } else { magnitude })
}

/// The widest price window a pool can represent for this orientation.
///
/// The bounds are the prices at [`Tick::MIN`] and [`Tick::MAX`], narrowed
/// by one raw unit at the low end so that every price inside converts
/// back to a valid sqrt price despite flooring.
///
/// # Errors
///
/// - [`PositionMathError::InvalidToken`] if base and quote coincide.
/// - [`PositionMathError::Overflow`] on arithmetic overflow.
pub fn representable_price_range(
    orientation: &PairOrientation,
) -> Result<PriceRange, PositionMathError> {
    let base = orientation.base().address();
    let quote = orientation.quote().address();
    let decimals = orientation.base().decimals();
    let at = |tick| -> Result<U256, PositionMathError> {
        sqrt_price_x96_to_raw_price(tick_to_sqrt_price_x96(tick)?, &base, &quote, decimals)
    };
    let (a, b) = (at(Tick::MIN)?, at(Tick::MAX)?);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    PriceRange::new(Price::new(lo.safe_add(&U256::from(1u8))?)?, Price::new(hi)?)
}

/// The default chart window around a position.
///
/// The window spans the range's two boundary prices, padded on each side
/// by `padding_bps / 10_000` of the range's width, and is widened if
/// needed to include `current_price`. It is then clamped to `limits`
/// (normally [`representable_price_range`]), so a range reaching the
/// edge of the tick space still yields a window that can be sampled.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if the padded window exceeds
/// 256 bits.
pub fn default_price_range(
    lower_price: U256,
    upper_price: U256,
    current_price: Price,
    padding_bps: u32,
    limits: PriceRange,
) -> Result<PriceRange, PositionMathError> {
    let (lo, hi) = if lower_price <= upper_price {
        (lower_price, upper_price)
    } else {
        (upper_price, lower_price)
    };
    let padding = mul_div(
        hi - lo,
        U256::from(padding_bps),
        U256::from(10_000u16),
        Rounding::Down,
    )?;

    let floor = limits.min().get();
    let ceiling = limits.max().get();
    let min = lo
        .saturating_sub(padding)
        .min(current_price.get())
        .clamp(floor, ceiling);
    let max = hi
        .saturating_add(padding)
        .max(current_price.get())
        .clamp(floor, ceiling);
    // Clamping keeps min <= max; equal bounds sit on one edge of `limits`.
    let (min, max) = match (min < max, max < ceiling) {
        (true, _) => (min, max),
        (false, true) => (min, max + U256::from(1u8)),
        (false, false) => (min - U256::from(1u8), max),
    };
    PriceRange::new(Price::new(min)?, Price::new(max)?)
}

/// Raw boundary prices of a position, sorted ascending in price space.
///
/// When the base token is `token1`, the upper tick maps to the lower price.
/// Each price is the smallest-error integer that converts back to its
/// boundary tick: a floored price that would fall one tick short is bumped
/// by one raw unit, so a sample drawn at a boundary gets that boundary's
/// phase.
///
/// # Errors
///
/// Returns [`PositionMathError::Overflow`] if a price exceeds 256 bits.
pub fn range_boundary_prices(
    position: &Position,
    orientation: &PairOrientation,
) -> Result<(U256, U256), PositionMathError> {
    let base = orientation.base().address();
    let quote = orientation.quote().address();
    let decimals = orientation.base().decimals();
    let at = |tick| -> Result<U256, PositionMathError> {
        let sqrt = tick_to_sqrt_price_x96(tick)?;
        let floored = sqrt_price_x96_to_raw_price(sqrt, &base, &quote, decimals)?;
        let lands = Price::new(floored)
            .and_then(|p| price_to_sqrt_price_x96(p, &base, &quote, decimals))
            .is_ok_and(|back| back >= sqrt);
        if lands {
            Ok(floored)
        } else {
            floored.safe_add(&U256::from(1u8))
        }
    };
    let a = at(position.range().lower())?;
    let b = at(position.range().upper())?;
    Ok(if a <= b { (a, b) } else { (b, a) })
}

/// Generates a curve and the chart markers around it.
///
/// Uses `config.price_range()` when set, else [`default_price_range`]
/// with `config.padding_bps()`, clamped to [`representable_price_range`].
///
/// # Errors
///
/// Propagates errors from [`generate_pnl_curve`] and
/// [`default_price_range`].
pub fn build_curve_data(
    position: &Position,
    initial_value: U256,
    orientation: &PairOrientation,
    tick_spacing: TickSpacing,
    current_price: Price,
    config: &CurveConfig,
) -> Result<CurveData, PositionMathError> {
    config.validate()?;
    let (lower_price, upper_price) = range_boundary_prices(position, orientation)?;
    let price_range = match config.price_range() {
        Some(range) => range,
        None => default_price_range(
            lower_price,
            upper_price,
            current_price,
            config.padding_bps(),
            representable_price_range(orientation)?,
        )?,
    };

    let points = generate_pnl_curve(
        position,
        initial_value,
        orientation,
        tick_spacing,
        price_range,
        config.sample_count(),
    )?;

    let pnl_range = PnlRange {
        min: points.iter().map(CurvePoint::pnl).min().unwrap_or(I256::ZERO),
        max: points.iter().map(CurvePoint::pnl).max().unwrap_or(I256::ZERO),
    };
    let current_price_index = closest_index(&points, current_price);
    let first = points.iter().position(|p| p.phase() == RangePhase::InRange);
    let last = points.iter().rposition(|p| p.phase() == RangePhase::InRange);
    let range_indices = match (first, last) {
        (Some(first), Some(last)) => Some(RangeIndices { first, last }),
        _ => None,
    };

    debug!(
        samples = points.len(),
        min = %price_range.min(),
        max = %price_range.max(),
        current_price_index,
        "built pnl curve"
    );

    Ok(CurveData {
        points,
        price_range,
        pnl_range,
        current_price_index,
        range_indices,
        lower_price,
        upper_price,
        current_price,
        initial_value,
    })
}

fn closest_index(points: &[CurvePoint], target: Price) -> usize {
    points
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| {
            let (a, b) = (p.price().get(), target.get());
            if a > b {
                a - b
            } else {
                b - a
            }
        })
        .map_or(0, |(i, _)| i)
}

fn to_signed(value: U256) -> Result<I256, PositionMathError> {
    I256::try_from(value).map_err(|_| PositionMathError::Overflow("value exceeds I256"))
}
