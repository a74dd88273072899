//! Position history events supplied by an indexer.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Liquidity, Price, TokenAmounts};

/// What happened to the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// Liquidity added; amounts are the tokens deposited.
    IncreaseLiquidity,
    /// Liquidity removed; amounts are the principal withdrawn.
    DecreaseLiquidity,
    /// Fees collected; amounts are the fee portion only.
    CollectFees,
}

/// One entry of a position's on-chain history.
///
/// `pool_price` is the pool's base price at the event's block. It may be
/// absent when the indexer could not resolve it; metrics that need it
/// then degrade instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionEvent {
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub liquidity_delta: Liquidity,
    #[serde(with = "crate::serde_decimal")]
    pub amount0: U256,
    #[serde(with = "crate::serde_decimal")]
    pub amount1: U256,
    #[serde(default)]
    pub pool_price: Option<Price>,
}

impl PositionEvent {
    /// A deposit of `amounts` minting `liquidity`.
    #[must_use]
    pub const fn increase(
        timestamp: DateTime<Utc>,
        liquidity: Liquidity,
        amounts: TokenAmounts,
        pool_price: Option<Price>,
    ) -> Self {
        Self {
            kind: EventKind::IncreaseLiquidity,
            timestamp,
            liquidity_delta: liquidity,
            amount0: amounts.token0(),
            amount1: amounts.token1(),
            pool_price,
        }
    }

    /// A withdrawal of `amounts` burning `liquidity`.
    #[must_use]
    pub const fn decrease(
        timestamp: DateTime<Utc>,
        liquidity: Liquidity,
        amounts: TokenAmounts,
        pool_price: Option<Price>,
    ) -> Self {
        Self {
            kind: EventKind::DecreaseLiquidity,
            timestamp,
            liquidity_delta: liquidity,
            amount0: amounts.token0(),
            amount1: amounts.token1(),
            pool_price,
        }
    }

    /// A fee collection.
    #[must_use]
    pub const fn collect(
        timestamp: DateTime<Utc>,
        fees: TokenAmounts,
        pool_price: Option<Price>,
    ) -> Self {
        Self {
            kind: EventKind::CollectFees,
            timestamp,
            liquidity_delta: Liquidity::ZERO,
            amount0: fees.token0(),
            amount1: fees.token1(),
            pool_price,
        }
    }

    /// The event's token amounts.
    #[must_use]
    pub const fn amounts(&self) -> TokenAmounts {
        TokenAmounts::new(self.amount0, self.amount1)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let json = r#"{
            "kind": "collectFees",
            "timestamp": "2024-03-01T00:00:00Z",
            "amount0": "1500000",
            "amount1": "0"
        }"#;
        let Ok(e) = serde_json::from_str::<PositionEvent>(json) else {
            panic!("valid event");
        };
        assert_eq!(e.kind, EventKind::CollectFees);
        assert_eq!(e.amount0, U256::from(1_500_000u32));
        assert!(e.liquidity_delta.is_zero());
        assert!(e.pool_price.is_none());
    }

    #[test]
    fn negative_amount_rejected() {
        let json = r#"{
            "kind": "increaseLiquidity",
            "timestamp": "2024-03-01T00:00:00Z",
            "liquidityDelta": "10",
            "amount0": "-5",
            "amount1": "0"
        }"#;
        assert!(serde_json::from_str::<PositionEvent>(json).is_err());
    }
}
