//! PnL curve rendering parameters.

use serde::{Deserialize, Serialize};

use crate::domain::PriceRange;
use crate::error::PositionMathError;

/// How a PnL curve is sampled.
///
/// # Validation
///
/// - `sample_count` in `[MIN_SAMPLE_COUNT, MAX_SAMPLE_COUNT]`.
/// - `padding_bps` at most [`MAX_PADDING_BPS`](Self::MAX_PADDING_BPS).
///
/// When `price_range` is `None` the window is derived from the position's
/// boundary prices padded by `padding_bps` of the range width on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CurveConfigRepr")]
pub struct CurveConfig {
    sample_count: usize,
    padding_bps: u32,
    price_range: Option<PriceRange>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurveConfigRepr {
    #[serde(default = "default_sample_count")]
    sample_count: usize,
    #[serde(default = "default_padding_bps")]
    padding_bps: u32,
    #[serde(default)]
    price_range: Option<PriceRange>,
}

const fn default_sample_count() -> usize {
    CurveConfig::DEFAULT_SAMPLE_COUNT
}

const fn default_padding_bps() -> u32 {
    CurveConfig::DEFAULT_PADDING_BPS
}

impl TryFrom<CurveConfigRepr> for CurveConfig {
    type Error = PositionMathError;

    fn try_from(repr: CurveConfigRepr) -> Result<Self, Self::Error> {
        Self::new(repr.sample_count, repr.padding_bps, repr.price_range)
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            sample_count: Self::DEFAULT_SAMPLE_COUNT,
            padding_bps: Self::DEFAULT_PADDING_BPS,
            price_range: None,
        }
    }
}

impl CurveConfig {
    /// Samples per curve unless configured otherwise.
    pub const DEFAULT_SAMPLE_COUNT: usize = 150;
    /// Half the range width on each side.
    pub const DEFAULT_PADDING_BPS: u32 = 5_000;
    /// A curve needs both endpoints.
    pub const MIN_SAMPLE_COUNT: usize = 2;
    /// Upper bound on samples per curve.
    pub const MAX_SAMPLE_COUNT: usize = 10_000;
    /// Ten range widths on each side.
    pub const MAX_PADDING_BPS: u32 = 100_000;

    /// Creates a validated curve config.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidConfiguration`] if
    /// `sample_count` or `padding_bps` is out of bounds.
    pub fn new(
        sample_count: usize,
        padding_bps: u32,
        price_range: Option<PriceRange>,
    ) -> Result<Self, PositionMathError> {
        let config = Self {
            sample_count,
            padding_bps,
            price_range,
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-checks all invariants.
    ///
    /// # Errors
    ///
    /// See [`CurveConfig::new`].
    pub const fn validate(&self) -> Result<(), PositionMathError> {
        if self.sample_count < Self::MIN_SAMPLE_COUNT {
            return Err(PositionMathError::InvalidConfiguration(
                "curve needs at least two samples",
            ));
        }
        if self.sample_count > Self::MAX_SAMPLE_COUNT {
            return Err(PositionMathError::InvalidConfiguration(
                "curve sample count exceeds 10000",
            ));
        }
        if self.padding_bps > Self::MAX_PADDING_BPS {
            return Err(PositionMathError::InvalidConfiguration(
                "curve padding exceeds 100000 basis points",
            ));
        }
        Ok(())
    }

    /// Returns a copy sampling an explicit window.
    #[must_use]
    pub const fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = Some(price_range);
        self
    }

    /// Number of samples.
    #[must_use]
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Padding around the range, in basis points of its width.
    #[must_use]
    pub const fn padding_bps(&self) -> u32 {
        self.padding_bps
    }

    /// Explicit sampling window, if any.
    #[must_use]
    pub const fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }
}
