//! One position in one pool, ready to value, chart and annualize.

use std::sync::Arc;

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::apr::{
    compute_pnl_breakdown, compute_position_pnl, PnlBreakdown, PositionEvent, PositionPnl,
};
use crate::config::{CurveConfig, PoolSnapshot, PositionConfig};
use crate::curve::{build_curve_data, cached_curve_data, CurveCacheKey, CurveData};
use crate::domain::{PairOrientation, Position, Price, RangePhase, TokenAmounts};
use crate::error::PositionMathError;
use crate::math::{get_token_amounts_at_sqrt_price, sqrt_price_x96_to_price};
use crate::traits::{CurveCache, FromConfig};
use crate::valuation::calculate_position_value;

/// A validated position bound to its pool snapshot.
///
/// Built with [`FromConfig`] from a `(PoolSnapshot, PositionConfig)` pair.
/// All figures are in raw quote-token units, with the quote chosen by the
/// position's `token0_is_quote` flag.
///
/// # Examples
///
/// ```
/// use clmm_position_math::analyzer::PositionAnalyzer;
/// use clmm_position_math::config::{PoolSnapshot, PositionConfig};
/// use clmm_position_math::domain::{
///     Decimals, Liquidity, SqrtPriceX96, Tick, TickSpacing, Token, TokenAddress,
/// };
/// use clmm_position_math::traits::FromConfig;
///
/// let usdc = Token::new(TokenAddress::from_bytes([1u8; 20]), Decimals::new(6).expect("valid"));
/// let weth = Token::new(TokenAddress::from_bytes([2u8; 20]), Decimals::new(18).expect("valid"));
/// let pool = PoolSnapshot::new(usdc, weth, TickSpacing::MEDIUM, Tick::ZERO, SqrtPriceX96::ONE)
///     .expect("consistent snapshot");
/// let position = PositionConfig::new(
///     "1",
///     Liquidity::new(1_000_000),
///     Tick::new(-600).expect("valid"),
///     Tick::new(600).expect("valid"),
///     true,
/// )
/// .expect("valid position");
///
/// let analyzer = PositionAnalyzer::from_config(&(pool, position)).expect("aligned");
/// assert!(analyzer.is_in_range());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionAnalyzer {
    pool: PoolSnapshot,
    position_id: String,
    position: Position,
    orientation: PairOrientation,
}

impl FromConfig<(PoolSnapshot, PositionConfig)> for PositionAnalyzer {
    fn from_config(config: &(PoolSnapshot, PositionConfig)) -> Result<Self, PositionMathError> {
        let (pool, position) = config;
        pool.validate()?;
        position.validate()?;
        let orientation = pool.token_pair()?.orient(position.quote_side());
        Ok(Self {
            pool: *pool,
            position_id: position.position_id().to_owned(),
            position: position.position(pool.tick_spacing())?,
            orientation,
        })
    }
}

impl PositionAnalyzer {
    /// The pool snapshot.
    #[must_use]
    pub const fn pool(&self) -> &PoolSnapshot {
        &self.pool
    }

    /// The position's identifier.
    #[must_use]
    pub fn position_id(&self) -> &str {
        &self.position_id
    }

    /// The position's range and liquidity.
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Base/quote orientation used for every price and value.
    #[must_use]
    pub const fn orientation(&self) -> &PairOrientation {
        &self.orientation
    }

    /// Where the pool's current tick sits relative to the range.
    #[must_use]
    pub const fn phase(&self) -> RangePhase {
        self.position.range().phase(self.pool.current_tick())
    }

    /// Returns `true` while the position earns fees.
    #[must_use]
    pub const fn is_in_range(&self) -> bool {
        matches!(self.phase(), RangePhase::InRange)
    }

    /// Token amounts the position holds at the pool's sqrt price.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::Overflow`] if an amount exceeds 256
    /// bits.
    pub fn token_amounts(&self) -> Result<TokenAmounts, PositionMathError> {
        get_token_amounts_at_sqrt_price(
            self.position.liquidity(),
            self.pool.sqrt_price_x96(),
            self.position.range(),
        )
    }

    /// The pool's price in quote units per whole base token.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidPrice`] if the price floors to
    /// zero raw quote units.
    pub fn current_price(&self) -> Result<Price, PositionMathError> {
        sqrt_price_x96_to_price(
            self.pool.sqrt_price_x96(),
            &self.orientation.base().address(),
            &self.orientation.quote().address(),
            self.orientation.base().decimals(),
        )
    }

    /// Current position value.
    ///
    /// # Errors
    ///
    /// See [`calculate_position_value`].
    pub fn current_value(&self) -> Result<U256, PositionMathError> {
        calculate_position_value(&self.position, self.pool.sqrt_price_x96(), &self.orientation)
    }

    /// PnL curve around the current price.
    ///
    /// # Errors
    ///
    /// See [`build_curve_data`].
    pub fn curve_data(
        &self,
        initial_value: U256,
        config: &CurveConfig,
    ) -> Result<CurveData, PositionMathError> {
        build_curve_data(
            &self.position,
            initial_value,
            &self.orientation,
            self.pool.tick_spacing(),
            self.current_price()?,
            config,
        )
    }

    /// [`curve_data`](Self::curve_data) behind `cache`.
    ///
    /// Entries are keyed by position id and current price only, so callers
    /// sharing a cache must use one `initial_value` and `config` per
    /// position.
    ///
    /// # Errors
    ///
    /// See [`build_curve_data`].
    pub fn curve_data_cached(
        &self,
        cache: &dyn CurveCache,
        initial_value: U256,
        config: &CurveConfig,
    ) -> Result<Arc<CurveData>, PositionMathError> {
        let key = CurveCacheKey::new(self.position_id.clone(), self.current_price()?);
        cached_curve_data(cache, key, || self.curve_data(initial_value, config))
    }

    /// APR breakdown as of `as_of`, with `unclaimed_fees` valued at the
    /// current price.
    ///
    /// # Errors
    ///
    /// See [`compute_pnl_breakdown`].
    pub fn pnl_breakdown(
        &self,
        history: &[PositionEvent],
        unclaimed_fees: TokenAmounts,
        as_of: DateTime<Utc>,
    ) -> Result<PnlBreakdown, PositionMathError> {
        debug!(
            position_id = %self.position_id,
            events = history.len(),
            "computing pnl breakdown"
        );
        compute_pnl_breakdown(
            history,
            unclaimed_fees,
            self.current_price()?,
            &self.orientation,
            as_of,
        )
    }

    /// Absolute PnL by source.
    ///
    /// # Errors
    ///
    /// See [`compute_position_pnl`].
    pub fn position_pnl(
        &self,
        history: &[PositionEvent],
        unclaimed_fees: TokenAmounts,
    ) -> Result<PositionPnl, PositionMathError> {
        compute_position_pnl(
            history,
            self.current_value()?,
            unclaimed_fees,
            self.current_price()?,
            &self.orientation,
        )
    }
}
