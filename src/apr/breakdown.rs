//! Realized, unrealized and blended APR.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::event::PositionEvent;
use super::ledger::{elapsed_seconds, CostBasisLedger};
use crate::domain::{PairOrientation, Price, TokenAmounts};
use crate::error::PositionMathError;
use crate::math::{u256_to_f64, CheckedArithmetic};
use crate::valuation::token_amounts_in_quote;

/// Seconds in a day.
pub const SECONDS_PER_DAY: u64 = 86_400;

const DAYS_PER_YEAR: f64 = 365.0;

/// APR figures and the inputs they were computed from.
///
/// Amounts are raw quote units. An APR is `None` when the history needed
/// for it is missing; the inputs of a missing metric are reported as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlBreakdown {
    pub realized_apr: Option<f64>,
    pub unrealized_apr: Option<f64>,
    pub total_apr: Option<f64>,
    #[serde(with = "crate::serde_decimal")]
    pub realized_fees_collected: U256,
    #[serde(rename = "realizedTWCostBasis", with = "crate::serde_decimal")]
    pub realized_tw_cost_basis: U256,
    pub realized_active_days: f64,
    #[serde(with = "crate::serde_decimal")]
    pub unrealized_fees_unclaimed: U256,
    #[serde(with = "crate::serde_decimal")]
    pub unrealized_cost_basis: U256,
    pub unrealized_active_days: f64,
    pub total_active_days: f64,
}

/// `fees / cost_basis · 365 / active_days · 100`.
///
/// Returns `0.0` when `cost_basis` is zero or `active_days` is not
/// positive.
#[must_use]
pub fn annualized_apr(fees: U256, cost_basis: U256, active_days: f64) -> f64 {
    if cost_basis.is_zero() || active_days <= 0.0 {
        return 0.0;
    }
    u256_to_f64(fees) / u256_to_f64(cost_basis) * (DAYS_PER_YEAR / active_days) * 100.0
}

/// Total fees annualized over total cost-basis-days.
///
/// `cost_basis_seconds` is the realized `tw_cost_basis · realized_seconds`
/// plus `unrealized_cost_basis · unrealized_seconds`. Returns `0.0` when
/// it is zero.
#[must_use]
pub fn blended_apr(total_fees: U256, cost_basis_seconds: U256) -> f64 {
    if cost_basis_seconds.is_zero() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let seconds_per_year = DAYS_PER_YEAR * SECONDS_PER_DAY as f64;
    u256_to_f64(total_fees) / u256_to_f64(cost_basis_seconds) * seconds_per_year * 100.0
}

#[allow(clippy::cast_precision_loss)]
fn to_days(seconds: u64) -> f64 {
    seconds as f64 / SECONDS_PER_DAY as f64
}

struct Realized {
    fees: U256,
    tw_cost_basis: U256,
    seconds: u64,
    cost_seconds: U256,
}

fn realized(ledger: &CostBasisLedger) -> Result<Realized, PositionMathError> {
    let fees = ledger.fees_collected()?;
    let seconds = match ledger.last_collect() {
        Some(at) => elapsed_seconds(ledger.first_deposit(), at)?,
        None => 0,
    };
    let cost_seconds = ledger.cost_seconds_at_last_collect();
    let tw_cost_basis = if seconds == 0 {
        U256::ZERO
    } else {
        cost_seconds / U256::from(seconds)
    };
    Ok(Realized {
        fees,
        tw_cost_basis,
        seconds,
        cost_seconds,
    })
}

/// Computes the APR breakdown of a position as of `as_of`.
///
/// - **Realized**: collected fees over the time-weighted cost basis from
///   the first deposit to the last fee collection.
/// - **Unrealized**: `unclaimed_fees` (valued at `current_price`) over the
///   current cost basis, from the last collection (or the first deposit)
///   to `as_of`.
/// - **Total**: all fees over all cost-basis-days, see [`blended_apr`].
///
/// Missing history degrades rather than fails: no usable deposit makes
/// every APR `None`; an unpriced fee collection makes the realized and
/// total APR `None`. Each degradation is logged at `warn`.
///
/// # Errors
///
/// - [`PositionMathError::InvalidConfiguration`] if events are out of
///   order or `as_of` precedes the last event.
/// - [`PositionMathError::Overflow`] on liquidity underflow or arithmetic
///   overflow.
pub fn compute_pnl_breakdown(
    events: &[PositionEvent],
    unclaimed_fees: TokenAmounts,
    current_price: Price,
    orientation: &PairOrientation,
    as_of: DateTime<Utc>,
) -> Result<PnlBreakdown, PositionMathError> {
    let unclaimed = token_amounts_in_quote(unclaimed_fees, current_price, orientation)?.total()?;

    let ledger = match CostBasisLedger::replay(events, orientation) {
        Ok(ledger) => ledger,
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "no usable cost basis; apr unavailable");
            return Ok(PnlBreakdown {
                realized_apr: None,
                unrealized_apr: None,
                total_apr: None,
                realized_fees_collected: U256::ZERO,
                realized_tw_cost_basis: U256::ZERO,
                realized_active_days: 0.0,
                unrealized_fees_unclaimed: unclaimed,
                unrealized_cost_basis: U256::ZERO,
                unrealized_active_days: 0.0,
                total_active_days: 0.0,
            });
        }
        Err(e) => return Err(e),
    };
    if as_of < ledger.last_event() {
        return Err(PositionMathError::InvalidConfiguration(
            "as-of instant precedes the last event",
        ));
    }

    let unrealized_since = ledger.last_collect().unwrap_or(ledger.first_deposit());
    let unrealized_seconds = elapsed_seconds(unrealized_since, as_of)?;
    let unrealized_days = to_days(unrealized_seconds);
    let unrealized_apr = annualized_apr(unclaimed, ledger.cost_basis(), unrealized_days);
    let total_days = to_days(elapsed_seconds(ledger.first_deposit(), as_of)?);

    let realized = match realized(&ledger) {
        Ok(r) => Some(r),
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "realized apr unavailable");
            None
        }
        Err(e) => return Err(e),
    };

    let breakdown = match realized {
        Some(r) => {
            let realized_days = to_days(r.seconds);
            let unrealized_cost_seconds = ledger
                .cost_basis()
                .checked_mul(U256::from(unrealized_seconds))
                .ok_or(PositionMathError::Overflow("cost-seconds overflow"))?;
            let total_fees = r.fees.safe_add(&unclaimed)?;
            let total_cost_seconds = r.cost_seconds.safe_add(&unrealized_cost_seconds)?;
            PnlBreakdown {
                realized_apr: Some(annualized_apr(r.fees, r.tw_cost_basis, realized_days)),
                unrealized_apr: Some(unrealized_apr),
                total_apr: Some(blended_apr(total_fees, total_cost_seconds)),
                realized_fees_collected: r.fees,
                realized_tw_cost_basis: r.tw_cost_basis,
                realized_active_days: realized_days,
                unrealized_fees_unclaimed: unclaimed,
                unrealized_cost_basis: ledger.cost_basis(),
                unrealized_active_days: unrealized_days,
                total_active_days: total_days,
            }
        }
        None => PnlBreakdown {
            realized_apr: None,
            unrealized_apr: Some(unrealized_apr),
            total_apr: None,
            realized_fees_collected: U256::ZERO,
            realized_tw_cost_basis: U256::ZERO,
            realized_active_days: 0.0,
            unrealized_fees_unclaimed: unclaimed,
            unrealized_cost_basis: ledger.cost_basis(),
            unrealized_active_days: unrealized_days,
            total_active_days: total_days,
        },
    };

    debug!(
        realized_apr = ?breakdown.realized_apr,
        unrealized_apr = ?breakdown.unrealized_apr,
        total_apr = ?breakdown.total_apr,
        total_active_days = breakdown.total_active_days,
        "computed pnl breakdown"
    );
    Ok(breakdown)
}
