//! Cost-basis replay of a position's history.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};

use super::event::{EventKind, PositionEvent};
use crate::domain::{Liquidity, PairOrientation, Price, Rounding, TokenAmounts};
use crate::error::PositionMathError;
use crate::math::CheckedArithmetic;
use crate::valuation::token_amounts_in_quote;

/// Running cost basis of a position, rebuilt from its event history.
///
/// - A deposit adds the quote value of the deposited tokens at the event's
///   pool price.
/// - A withdrawal of `ΔL` out of `L` removes `cost · ΔL / L`.
/// - Between events the ledger integrates `cost · seconds`, the numerator
///   of every time-weighted cost basis.
///
/// Fee and withdrawal totals become unknown once an event that needs a
/// price arrives without one; the cost basis itself is only unknown if a
/// deposit is unpriced, in which case [`replay`](Self::replay) fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostBasisLedger {
    liquidity: Liquidity,
    cost_basis: U256,
    cost_seconds: U256,
    first_deposit: DateTime<Utc>,
    last_event: DateTime<Utc>,
    last_collect: Option<DateTime<Utc>>,
    cost_seconds_at_last_collect: U256,
    fees_collected: Option<U256>,
    withdrawn_value: Option<U256>,
    cost_removed: U256,
}

impl CostBasisLedger {
    /// Replays `events` in order.
    ///
    /// # Errors
    ///
    /// - [`PositionMathError::MissingHistoryData`] if the history is empty,
    ///   does not open with a deposit, or has a deposit with no pool price.
    /// - [`PositionMathError::InvalidConfiguration`] if timestamps go
    ///   backwards.
    /// - [`PositionMathError::Overflow`] if a withdrawal exceeds the
    ///   position's liquidity or a sum overflows.
    pub fn replay(
        events: &[PositionEvent],
        orientation: &PairOrientation,
    ) -> Result<Self, PositionMathError> {
        let Some(first) = events.first() else {
            return Err(PositionMathError::MissingHistoryData(
                "position has no recorded events",
            ));
        };
        if first.kind != EventKind::IncreaseLiquidity {
            return Err(PositionMathError::MissingHistoryData(
                "history does not start with a deposit",
            ));
        }
        let mut ledger = Self {
            liquidity: Liquidity::ZERO,
            cost_basis: U256::ZERO,
            cost_seconds: U256::ZERO,
            first_deposit: first.timestamp,
            last_event: first.timestamp,
            last_collect: None,
            cost_seconds_at_last_collect: U256::ZERO,
            fees_collected: Some(U256::ZERO),
            withdrawn_value: Some(U256::ZERO),
            cost_removed: U256::ZERO,
        };
        for event in events {
            ledger.apply(event, orientation)?;
        }
        Ok(ledger)
    }

    /// Applies one event.
    ///
    /// # Errors
    ///
    /// See [`CostBasisLedger::replay`].
    pub fn apply(
        &mut self,
        event: &PositionEvent,
        orientation: &PairOrientation,
    ) -> Result<(), PositionMathError> {
        let elapsed = elapsed_seconds(self.last_event, event.timestamp)?;
        let accrued = self
            .cost_basis
            .checked_mul(U256::from(elapsed))
            .ok_or(PositionMathError::Overflow("cost-seconds overflow"))?;
        self.cost_seconds = self.cost_seconds.safe_add(&accrued)?;
        self.last_event = event.timestamp;

        let value = quote_value(event.amounts(), event.pool_price, orientation)?;
        match event.kind {
            EventKind::IncreaseLiquidity => {
                let Some(value) = value else {
                    return Err(PositionMathError::MissingHistoryData(
                        "deposit without pool price",
                    ));
                };
                self.cost_basis = self.cost_basis.safe_add(&value)?;
                self.liquidity = self.liquidity.safe_add(&event.liquidity_delta)?;
            }
            EventKind::DecreaseLiquidity => {
                let before = self.liquidity;
                self.liquidity = before.safe_sub(&event.liquidity_delta)?;
                let removed = if event.liquidity_delta == before {
                    self.cost_basis
                } else {
                    self.cost_basis.safe_mul_div(
                        &event.liquidity_delta.to_u256(),
                        &before.to_u256(),
                        Rounding::Down,
                    )?
                };
                self.cost_basis = self.cost_basis.safe_sub(&removed)?;
                self.cost_removed = self.cost_removed.safe_add(&removed)?;
                self.withdrawn_value = add_known(self.withdrawn_value, value)?;
            }
            EventKind::CollectFees => {
                self.fees_collected = add_known(self.fees_collected, value)?;
                self.last_collect = Some(event.timestamp);
                self.cost_seconds_at_last_collect = self.cost_seconds;
            }
        }
        Ok(())
    }

    /// Liquidity remaining after the last event.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Cost basis remaining after the last event, in raw quote units.
    #[must_use]
    pub const fn cost_basis(&self) -> U256 {
        self.cost_basis
    }

    /// Cost basis removed by withdrawals so far.
    #[must_use]
    pub const fn cost_removed(&self) -> U256 {
        self.cost_removed
    }

    /// `∫ cost dt` in quote-unit-seconds up to the last event.
    #[must_use]
    pub const fn cost_seconds(&self) -> U256 {
        self.cost_seconds
    }

    /// `∫ cost dt` up to the most recent fee collection (zero if none).
    #[must_use]
    pub const fn cost_seconds_at_last_collect(&self) -> U256 {
        self.cost_seconds_at_last_collect
    }

    /// Timestamp of the opening deposit.
    #[must_use]
    pub const fn first_deposit(&self) -> DateTime<Utc> {
        self.first_deposit
    }

    /// Timestamp of the most recent event.
    #[must_use]
    pub const fn last_event(&self) -> DateTime<Utc> {
        self.last_event
    }

    /// Timestamp of the most recent fee collection.
    #[must_use]
    pub const fn last_collect(&self) -> Option<DateTime<Utc>> {
        self.last_collect
    }

    /// Quote value of all collected fees.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::MissingHistoryData`] if a collection
    /// with base-token fees had no pool price.
    pub fn fees_collected(&self) -> Result<U256, PositionMathError> {
        self.fees_collected.ok_or(PositionMathError::MissingHistoryData(
            "fee collection without pool price",
        ))
    }

    /// Quote value of all withdrawn principal, each at its event's price.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::MissingHistoryData`] if a withdrawal
    /// with base tokens had no pool price.
    pub fn withdrawn_value(&self) -> Result<U256, PositionMathError> {
        self.withdrawn_value.ok_or(PositionMathError::MissingHistoryData(
            "withdrawal without pool price",
        ))
    }
}

/// Whole seconds from `from` to `to`.
///
/// # Errors
///
/// Returns [`PositionMathError::InvalidConfiguration`] if `to` precedes
/// `from`.
pub(crate) fn elapsed_seconds(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<u64, PositionMathError> {
    u64::try_from(to.signed_duration_since(from).num_seconds()).map_err(|_| {
        PositionMathError::InvalidConfiguration("position events out of chronological order")
    })
}

/// Quote value of `amounts`; `None` when base tokens are present but the
/// price is not.
fn quote_value(
    amounts: TokenAmounts,
    price: Option<Price>,
    orientation: &PairOrientation,
) -> Result<Option<U256>, PositionMathError> {
    let (base, quote) = amounts.split(orientation.base_is_token0());
    match price {
        Some(price) => token_amounts_in_quote(amounts, price, orientation)?
            .total()
            .map(Some),
        None if base.is_zero() => Ok(Some(quote)),
        None => Ok(None),
    }
}

fn add_known(total: Option<U256>, value: Option<U256>) -> Result<Option<U256>, PositionMathError> {
    match (total, value) {
        (Some(total), Some(value)) => total.safe_add(&value).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::{Decimals, Token, TokenAddress};

    const DAY: u64 = 86_400;

    fn token(byte: u8, decimals: u8) -> Token {
        let Ok(d) = Decimals::new(decimals) else {
            panic!("valid decimals");
        };
        Token::new(TokenAddress::from_bytes([byte; 20]), d)
    }

    // WETH (token0, base) / USDC (token1, quote).
    fn weth_usdc() -> PairOrientation {
        let Ok(o) = PairOrientation::new(token(1, 18), token(2, 6)) else {
            panic!("valid orientation");
        };
        o
    }

    fn at(days: i64) -> DateTime<Utc> {
        let Some(t) = Utc.timestamp_opt(1_700_000_000 + days * 86_400, 0).single() else {
            panic!("valid timestamp");
        };
        t
    }

    fn usd(v: u64) -> U256 {
        U256::from(v) * U256::from(1_000_000u32)
    }

    fn price_2000() -> Option<Price> {
        Price::new(usd(2_000)).ok()
    }

    fn eth(v: u64) -> U256 {
        U256::from(v) * U256::from(10u64.pow(18))
    }

    fn deposit(day: i64, l: u128, weth: u64, usdc: u64) -> PositionEvent {
        PositionEvent::increase(
            at(day),
            Liquidity::new(l),
            TokenAmounts::new(eth(weth), usd(usdc)),
            price_2000(),
        )
    }

    #[test]
    fn deposit_sets_cost_basis() {
        let Ok(ledger) = CostBasisLedger::replay(&[deposit(0, 100, 1, 2_000)], &weth_usdc()) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.cost_basis(), usd(4_000));
        assert_eq!(ledger.liquidity(), Liquidity::new(100));
        assert!(ledger.cost_seconds().is_zero());
    }

    #[test]
    fn proportional_withdrawal_and_integral() {
        let events = [
            deposit(0, 100, 1, 2_000),
            PositionEvent::decrease(
                at(10),
                Liquidity::new(25),
                TokenAmounts::new(eth(1) / U256::from(4u8), usd(500)),
                price_2000(),
            ),
        ];
        let Ok(ledger) = CostBasisLedger::replay(&events, &weth_usdc()) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.cost_basis(), usd(3_000));
        assert_eq!(ledger.cost_removed(), usd(1_000));
        assert_eq!(ledger.cost_seconds(), usd(4_000) * U256::from(10 * DAY));
        assert_eq!(ledger.withdrawn_value(), Ok(usd(1_000)));
        assert_eq!(ledger.liquidity(), Liquidity::new(75));
    }

    #[test]
    fn full_withdrawal_clears_cost() {
        let events = [
            deposit(0, 100, 1, 0),
            PositionEvent::decrease(at(1), Liquidity::new(100), TokenAmounts::ZERO, price_2000()),
        ];
        let Ok(ledger) = CostBasisLedger::replay(&events, &weth_usdc()) else {
            panic!("expected Ok");
        };
        assert!(ledger.cost_basis().is_zero());
        assert!(ledger.liquidity().is_zero());
    }

    #[test]
    fn collection_marks_window() {
        let events = [
            deposit(0, 100, 0, 1_000),
            PositionEvent::collect(at(5), TokenAmounts::new(U256::ZERO, usd(10)), None),
        ];
        let Ok(ledger) = CostBasisLedger::replay(&events, &weth_usdc()) else {
            panic!("expected Ok");
        };
        // Quote-only fees need no price.
        assert_eq!(ledger.fees_collected(), Ok(usd(10)));
        assert_eq!(ledger.last_collect(), Some(at(5)));
        assert_eq!(
            ledger.cost_seconds_at_last_collect(),
            usd(1_000) * U256::from(5 * DAY)
        );
    }

    #[test]
    fn unpriced_base_fees_unknown() {
        let events = [
            deposit(0, 100, 0, 1_000),
            PositionEvent::collect(at(5), TokenAmounts::new(eth(1), U256::ZERO), None),
        ];
        let Ok(ledger) = CostBasisLedger::replay(&events, &weth_usdc()) else {
            panic!("expected Ok");
        };
        assert!(matches!(
            ledger.fees_collected(),
            Err(PositionMathError::MissingHistoryData(_))
        ));
        assert_eq!(ledger.cost_basis(), usd(1_000));
    }

    #[test]
    fn missing_history() {
        assert!(matches!(
            CostBasisLedger::replay(&[], &weth_usdc()),
            Err(PositionMathError::MissingHistoryData(_))
        ));
        let collect_first = [PositionEvent::collect(at(0), TokenAmounts::ZERO, None)];
        assert!(matches!(
            CostBasisLedger::replay(&collect_first, &weth_usdc()),
            Err(PositionMathError::MissingHistoryData(_))
        ));
        let unpriced = [PositionEvent::increase(
            at(0),
            Liquidity::new(1),
            TokenAmounts::new(eth(1), U256::ZERO),
            None,
        )];
        assert!(matches!(
            CostBasisLedger::replay(&unpriced, &weth_usdc()),
            Err(PositionMathError::MissingHistoryData(_))
        ));
    }

    #[test]
    fn malformed_history_propagates() {
        let backwards = [deposit(5, 100, 1, 0), deposit(4, 100, 1, 0)];
        assert!(matches!(
            CostBasisLedger::replay(&backwards, &weth_usdc()),
            Err(PositionMathError::InvalidConfiguration(_))
        ));
        let overdrawn = [
            deposit(0, 100, 1, 0),
            PositionEvent::decrease(at(1), Liquidity::new(101), TokenAmounts::ZERO, price_2000()),
        ];
        assert!(matches!(
            CostBasisLedger::replay(&overdrawn, &weth_usdc()),
            Err(PositionMathError::Overflow(_))
        ));
    }
}
