//! Point-in-time pool state, as read from `slot0` and the token contracts.

use serde::{Deserialize, Serialize};

use crate::domain::{SqrtPriceX96, Tick, TickSpacing, Token, TokenPair};
use crate::error::PositionMathError;
use crate::math::sqrt_price_x96_to_tick;

/// A snapshot of the pool a position lives in.
///
/// # Validation
///
/// - `token0` must sort strictly before `token1` (distinct addresses,
///   canonical order).
/// - `current_tick` must be the tick of `sqrt_price_x96`, or the tick just
///   below it. The pool reports the lower tick when a downward swap stops
///   exactly on a tick boundary.
///
/// Deserialization runs the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PoolSnapshotRepr")]
pub struct PoolSnapshot {
    token0: Token,
    token1: Token,
    tick_spacing: TickSpacing,
    current_tick: Tick,
    sqrt_price_x96: SqrtPriceX96,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolSnapshotRepr {
    token0: Token,
    token1: Token,
    tick_spacing: TickSpacing,
    current_tick: Tick,
    sqrt_price_x96: SqrtPriceX96,
}

impl TryFrom<PoolSnapshotRepr> for PoolSnapshot {
    type Error = PositionMathError;

    fn try_from(repr: PoolSnapshotRepr) -> Result<Self, Self::Error> {
        Self::new(
            repr.token0,
            repr.token1,
            repr.tick_spacing,
            repr.current_tick,
            repr.sqrt_price_x96,
        )
    }
}

impl PoolSnapshot {
    /// Creates a validated snapshot.
    ///
    /// # Errors
    ///
    /// - [`PositionMathError::InvalidToken`] if the tokens are equal or out
    ///   of canonical order.
    /// - [`PositionMathError::InvalidConfiguration`] if `current_tick` does
    ///   not match `sqrt_price_x96`.
    pub fn new(
        token0: Token,
        token1: Token,
        tick_spacing: TickSpacing,
        current_tick: Tick,
        sqrt_price_x96: SqrtPriceX96,
    ) -> Result<Self, PositionMathError> {
        let snapshot = Self {
            token0,
            token1,
            tick_spacing,
            current_tick,
            sqrt_price_x96,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Re-checks all invariants.
    ///
    /// # Errors
    ///
    /// See [`PoolSnapshot::new`].
    pub fn validate(&self) -> Result<(), PositionMathError> {
        if !self.token0.sorts_before(&self.token1) {
            return Err(PositionMathError::InvalidToken(
                "token0 must have a lower address than token1",
            ));
        }
        let implied = sqrt_price_x96_to_tick(self.sqrt_price_x96)?.get();
        let tick = self.current_tick.get();
        if tick != implied && tick != implied - 1 {
            return Err(PositionMathError::InvalidConfiguration(
                "current tick does not match sqrt price",
            ));
        }
        Ok(())
    }

    /// Returns the lower-address token.
    #[must_use]
    pub const fn token0(&self) -> Token {
        self.token0
    }

    /// Returns the higher-address token.
    #[must_use]
    pub const fn token1(&self) -> Token {
        self.token1
    }

    /// Returns both tokens as a canonical pair.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidToken`] if the addresses are
    /// equal, which [`validate`](Self::validate) already rules out.
    pub fn token_pair(&self) -> Result<TokenPair, PositionMathError> {
        TokenPair::new(self.token0, self.token1)
    }

    /// Returns the pool's tick spacing.
    #[must_use]
    pub const fn tick_spacing(&self) -> TickSpacing {
        self.tick_spacing
    }

    /// Returns the tick reported by `slot0`.
    #[must_use]
    pub const fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Returns the sqrt price reported by `slot0`.
    #[must_use]
    pub const fn sqrt_price_x96(&self) -> SqrtPriceX96 {
        self.sqrt_price_x96
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimals, TokenAddress};
    use crate::math::tick_to_sqrt_price_x96;

    fn token(byte: u8, decimals: u8) -> Token {
        let Ok(d) = Decimals::new(decimals) else {
            panic!("valid decimals");
        };
        Token::new(TokenAddress::from_bytes([byte; 20]), d)
    }

    fn tick(v: i32) -> Tick {
        let Ok(t) = Tick::new(v) else {
            panic!("valid tick");
        };
        t
    }

    fn sqrt_at(v: i32) -> SqrtPriceX96 {
        let Ok(s) = tick_to_sqrt_price_x96(tick(v)) else {
            panic!("valid sqrt");
        };
        s
    }

    #[test]
    fn valid_snapshot() {
        let r = PoolSnapshot::new(
            token(1, 6),
            token(2, 18),
            TickSpacing::LOW,
            tick(200_000),
            sqrt_at(200_000),
        );
        let Ok(snap) = r else {
            panic!("expected Ok");
        };
        assert_eq!(snap.current_tick().get(), 200_000);
        assert!(snap.token_pair().is_ok());
    }

    #[test]
    fn tick_one_below_boundary_accepted() {
        let r = PoolSnapshot::new(
            token(1, 6),
            token(2, 18),
            TickSpacing::LOW,
            tick(199_999),
            sqrt_at(200_000),
        );
        assert!(r.is_ok());
    }

    #[test]
    fn inconsistent_tick_rejected() {
        let r = PoolSnapshot::new(
            token(1, 6),
            token(2, 18),
            TickSpacing::LOW,
            tick(100),
            sqrt_at(200_000),
        );
        assert!(matches!(r, Err(PositionMathError::InvalidConfiguration(_))));
    }

    #[test]
    fn token_order_enforced() {
        let r = PoolSnapshot::new(token(2, 18), token(1, 6), TickSpacing::LOW, tick(0), sqrt_at(0));
        assert!(matches!(r, Err(PositionMathError::InvalidToken(_))));
        let same = PoolSnapshot::new(token(1, 6), token(1, 6), TickSpacing::LOW, tick(0), sqrt_at(0));
        assert!(matches!(same, Err(PositionMathError::InvalidToken(_))));
    }

    #[test]
    fn deserializes_from_json() {
        let json = format!(
            r#"{{
                "token0": {{ "address": "0x{a}", "decimals": 6 }},
                "token1": {{ "address": "0x{b}", "decimals": 18 }},
                "tickSpacing": 60,
                "currentTick": 0,
                "sqrtPriceX96": "79228162514264337593543950336"
            }}"#,
            a = "01".repeat(20),
            b = "02".repeat(20),
        );
        let Ok(snap) = serde_json::from_str::<PoolSnapshot>(&json) else {
            panic!("valid snapshot json");
        };
        assert_eq!(snap.tick_spacing(), TickSpacing::MEDIUM);
        assert_eq!(snap.sqrt_price_x96(), SqrtPriceX96::ONE);
    }

    #[test]
    fn json_with_bad_tick_rejected() {
        let json = format!(
            r#"{{
                "token0": {{ "address": "0x{a}", "decimals": 6 }},
                "token1": {{ "address": "0x{b}", "decimals": 18 }},
                "tickSpacing": 60,
                "currentTick": 500,
                "sqrtPriceX96": "79228162514264337593543950336"
            }}"#,
            a = "01".repeat(20),
            b = "02".repeat(20),
        );
        assert!(serde_json::from_str::<PoolSnapshot>(&json).is_err());
    }
}
