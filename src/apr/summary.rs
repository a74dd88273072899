//! Absolute PnL of a position.

use alloy_primitives::{I256, U256};
use serde::{Deserialize, Serialize};

use super::event::PositionEvent;
use super::ledger::CostBasisLedger;
use crate::domain::{PairOrientation, Price, TokenAmounts};
use crate::error::PositionMathError;
use crate::valuation::token_amounts_in_quote;

/// Where a position's profit came from, in raw quote units.
///
/// `total_pnl = realized_pnl + unrealized_pnl + collected_fees + unclaimed_fees`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPnl {
    #[serde(with = "crate::serde_decimal")]
    pub current_value: I256,
    #[serde(with = "crate::serde_decimal")]
    pub cost_basis: I256,
    /// Withdrawn value minus the cost basis those withdrawals removed.
    #[serde(with = "crate::serde_decimal")]
    pub realized_pnl: I256,
    /// Current value minus remaining cost basis.
    #[serde(with = "crate::serde_decimal")]
    pub unrealized_pnl: I256,
    #[serde(with = "crate::serde_decimal")]
    pub collected_fees: I256,
    #[serde(with = "crate::serde_decimal")]
    pub unclaimed_fees: I256,
    #[serde(with = "crate::serde_decimal")]
    pub total_pnl: I256,
}

/// Computes a position's PnL summary.
///
/// Unlike [`compute_pnl_breakdown`](super::compute_pnl_breakdown) this does
/// not degrade: every figure needs the full priced history.
///
/// # Errors
///
/// - [`PositionMathError::MissingHistoryData`] if the history is empty or
///   a deposit, withdrawal or fee collection lacks a needed pool price.
/// - [`PositionMathError::InvalidConfiguration`] for out-of-order events.
/// - [`PositionMathError::Overflow`] on liquidity underflow or overflow.
pub fn compute_position_pnl(
    events: &[PositionEvent],
    current_value: U256,
    unclaimed_fees: TokenAmounts,
    current_price: Price,
    orientation: &PairOrientation,
) -> Result<PositionPnl, PositionMathError> {
    let ledger = CostBasisLedger::replay(events, orientation)?;
    let unclaimed = token_amounts_in_quote(unclaimed_fees, current_price, orientation)?.total()?;

    let current_value = signed(current_value)?;
    let cost_basis = signed(ledger.cost_basis())?;
    let realized_pnl = checked_sub(signed(ledger.withdrawn_value()?)?, signed(ledger.cost_removed())?)?;
    let unrealized_pnl = checked_sub(current_value, cost_basis)?;
    let collected_fees = signed(ledger.fees_collected()?)?;
    let unclaimed_fees = signed(unclaimed)?;
    let total_pnl = [unrealized_pnl, collected_fees, unclaimed_fees]
        .into_iter()
        .try_fold(realized_pnl, |acc, v| {
            acc.checked_add(v)
                .ok_or(PositionMathError::Overflow("pnl sum overflow"))
        })?;

    Ok(PositionPnl {
        current_value,
        cost_basis,
        realized_pnl,
        unrealized_pnl,
        collected_fees,
        unclaimed_fees,
        total_pnl,
    })
}

fn signed(value: U256) -> Result<I256, PositionMathError> {
    I256::try_from(value).map_err(|_| PositionMathError::Overflow("value exceeds I256"))
}

fn checked_sub(a: I256, b: I256) -> Result<I256, PositionMathError> {
    a.checked_sub(b)
        .ok_or(PositionMathError::Overflow("pnl difference overflow"))
}
