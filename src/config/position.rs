//! A liquidity position as the tracking layer stores it.

use serde::{Deserialize, Serialize};

use crate::domain::{Liquidity, Position, PositionRange, QuoteSide, Tick, TickSpacing};
use crate::error::PositionMathError;

/// Declarative description of one position.
///
/// `liquidity` travels as a decimal string. `token0_is_quote` picks the
/// denomination for prices and values.
///
/// # Validation
///
/// - `position_id` must be non-empty.
/// - `tick_lower < tick_upper`.
///
/// Alignment to the pool's tick spacing is checked by
/// [`PositionConfig::position`], which needs the pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PositionConfigRepr")]
pub struct PositionConfig {
    position_id: String,
    liquidity: Liquidity,
    tick_lower: Tick,
    tick_upper: Tick,
    token0_is_quote: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionConfigRepr {
    position_id: String,
    liquidity: Liquidity,
    tick_lower: Tick,
    tick_upper: Tick,
    token0_is_quote: bool,
}

impl TryFrom<PositionConfigRepr> for PositionConfig {
    type Error = PositionMathError;

    fn try_from(repr: PositionConfigRepr) -> Result<Self, Self::Error> {
        Self::new(
            repr.position_id,
            repr.liquidity,
            repr.tick_lower,
            repr.tick_upper,
            repr.token0_is_quote,
        )
    }
}

impl PositionConfig {
    /// Creates a validated position config.
    ///
    /// # Errors
    ///
    /// - [`PositionMathError::InvalidConfiguration`] if `position_id` is
    ///   empty.
    /// - [`PositionMathError::InvalidRange`] if `tick_lower >= tick_upper`.
    pub fn new(
        position_id: impl Into<String>,
        liquidity: Liquidity,
        tick_lower: Tick,
        tick_upper: Tick,
        token0_is_quote: bool,
    ) -> Result<Self, PositionMathError> {
        let config = Self {
            position_id: position_id.into(),
            liquidity,
            tick_lower,
            tick_upper,
            token0_is_quote,
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-checks all invariants.
    ///
    /// # Errors
    ///
    /// See [`PositionConfig::new`].
    pub fn validate(&self) -> Result<(), PositionMathError> {
        if self.position_id.trim().is_empty() {
            return Err(PositionMathError::InvalidConfiguration(
                "position id must not be empty",
            ));
        }
        PositionRange::new(self.tick_lower, self.tick_upper)?;
        Ok(())
    }

    /// Caller-assigned identifier, used as the curve cache key.
    #[must_use]
    pub fn position_id(&self) -> &str {
        &self.position_id
    }

    /// Position liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Lower tick bound (inclusive).
    #[must_use]
    pub const fn tick_lower(&self) -> Tick {
        self.tick_lower
    }

    /// Upper tick bound (exclusive).
    #[must_use]
    pub const fn tick_upper(&self) -> Tick {
        self.tick_upper
    }

    /// Which pool token is the quote.
    #[must_use]
    pub const fn quote_side(&self) -> QuoteSide {
        QuoteSide::from_token0_is_quote(self.token0_is_quote)
    }

    /// Builds the domain position, checking alignment to `spacing`.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidRange`] if either bound is not a
    /// multiple of `spacing`.
    pub fn position(&self, spacing: TickSpacing) -> Result<Position, PositionMathError> {
        let range = PositionRange::aligned(self.tick_lower, self.tick_upper, spacing)?;
        Ok(Position::new(range, self.liquidity))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tick(v: i32) -> Tick {
        let Ok(t) = Tick::new(v) else {
            panic!("valid tick");
        };
        t
    }

    #[test]
    fn builds_aligned_position() {
        let Ok(cfg) = PositionConfig::new("42", Liquidity::new(7), tick(-120), tick(120), true)
        else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.quote_side(), QuoteSide::Token0);
        let Ok(pos) = cfg.position(TickSpacing::MEDIUM) else {
            panic!("aligned");
        };
        assert_eq!(pos.liquidity().get(), 7);
        assert_eq!(pos.range().width(), 240);
    }

    #[test]
    fn misaligned_for_pool_spacing() {
        let Ok(cfg) = PositionConfig::new("42", Liquidity::new(7), tick(-10), tick(10), false)
        else {
            panic!("expected Ok");
        };
        assert!(cfg.position(TickSpacing::LOW).is_ok());
        assert!(matches!(
            cfg.position(TickSpacing::MEDIUM),
            Err(PositionMathError::InvalidRange(_))
        ));
    }

    #[test]
    fn rejects_inverted_range_and_empty_id() {
        assert!(matches!(
            PositionConfig::new("1", Liquidity::new(1), tick(60), tick(0), false),
            Err(PositionMathError::InvalidRange(_))
        ));
        assert!(matches!(
            PositionConfig::new(" ", Liquidity::new(1), tick(0), tick(60), false),
            Err(PositionMathError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn json_with_string_liquidity() {
        let json = r#"{
            "positionId": "123",
            "liquidity": "340282366920938463463374607431768211455",
            "tickLower": -887220,
            "tickUpper": 887220,
            "token0IsQuote": false
        }"#;
        let Ok(cfg) = serde_json::from_str::<PositionConfig>(json) else {
            panic!("valid json");
        };
        assert_eq!(cfg.liquidity().get(), u128::MAX);
        assert_eq!(cfg.position_id(), "123");
        assert_eq!(cfg.quote_side(), QuoteSide::Token1);
    }
}
