//! Unified error types for the position math engine.
//!
//! All fallible operations across the crate return [`PositionMathError`],
//! so callers match on a single enum regardless of which component failed.
//!
//! # Propagation
//!
//! Every variant except [`PositionMathError::MissingHistoryData`] signals a
//! caller bug or malformed input and is propagated immediately. The APR
//! aggregator is the only component that catches an error
//! (`MissingHistoryData`) and substitutes a degraded result.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, PositionMathError>;

/// Errors produced by the position math engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionMathError {
    /// A tick index lies outside `[-887272, 887272]`.
    #[error("tick {0} out of range [-887272, 887272]")]
    TickOutOfRange(i32),

    /// A sqrt price lies outside `[MIN_SQRT_RATIO, MAX_SQRT_RATIO]`.
    #[error("invalid sqrt price: {0}")]
    InvalidSqrtPrice(&'static str),

    /// A price is zero, negative, non-finite, or otherwise unusable.
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),

    /// A tick range is empty, inverted, or not aligned to the tick spacing.
    #[error("invalid range: {0}")]
    InvalidRange(&'static str),

    /// A token's decimals value lies outside `0..=36`.
    #[error("token decimals {0} outside supported range 0..=36")]
    DecimalsMismatch(u8),

    /// Historical event data needed for a metric is absent.
    ///
    /// Recoverable: the APR aggregator degrades the affected sub-metric.
    #[error("missing history data: {0}")]
    MissingHistoryData(&'static str),

    /// An intermediate or final value does not fit its integer type.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A division by zero was attempted.
    #[error("division by zero")]
    DivisionByZero,

    /// A configuration value is inconsistent or out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A token pair or token reference is invalid.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A string-encoded value could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

impl PositionMathError {
    /// Returns `true` for errors the APR aggregator may absorb.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingHistoryData(_))
    }
}
