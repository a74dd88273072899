//! Generic construction trait for building analyzers from configuration.
//!
//! [`FromConfig`] gives every config-driven type a uniform constructor.
//! The analyzer implements it for the `(PoolSnapshot, PositionConfig)`
//! pair a caller loads from storage or an RPC snapshot.
//!
//! # Validation Contract
//!
//! Implementations **must** validate every configuration invariant during
//! construction. A successfully constructed value is guaranteed to be
//! internally consistent, for example:
//!
//! - the pool's two tokens have distinct addresses,
//! - the position's range is ordered and aligned to the pool's tick spacing,
//! - the pool's current tick agrees with its sqrt price.

use crate::error::PositionMathError;

/// Builds `Self` from a configuration value `C`.
///
/// There is no blanket implementation; every pairing is explicit.
///
/// # Errors
///
/// Returns [`PositionMathError::InvalidConfiguration`] (or a more specific
/// variant) if the configuration is invalid.
pub trait FromConfig<C> {
    /// Creates a new instance from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`PositionMathError::InvalidConfiguration`] if a parameter is
    ///   inconsistent.
    /// - [`PositionMathError::InvalidRange`] if the position range is
    ///   malformed.
    /// - [`PositionMathError::InvalidToken`] if the token pair is invalid.
    fn from_config(config: &C) -> Result<Self, PositionMathError>
    where
        Self: Sized;
}
