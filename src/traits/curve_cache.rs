//! Pluggable storage for computed PnL curves.
//!
//! Curve generation samples a position's value at a hundred or more
//! prices, each needing a 512-bit square root and a tick search. Callers
//! that render the same position repeatedly inject a [`CurveCache`] so the
//! work happens once per `(position, current price)` pair.
//!
//! Implementations must be safe to share between threads. Two callers
//! racing on the same key may both compute and both insert; results are
//! deterministic, so the last write wins harmlessly.

use std::sync::Arc;

use crate::curve::{CurveCacheKey, CurveData};

/// Key/value store for [`CurveData`] snapshots.
///
/// # Implementors
///
/// - [`InMemoryCurveCache`](crate::curve::InMemoryCurveCache): process-local
///   map behind a `RwLock`.
/// - [`NoopCurveCache`](crate::curve::NoopCurveCache): never stores anything.
pub trait CurveCache: Send + Sync {
    /// Returns the cached curve for `key`, if present.
    fn get(&self, key: &CurveCacheKey) -> Option<Arc<CurveData>>;

    /// Stores `data` under `key`, replacing any previous entry.
    fn set(&self, key: CurveCacheKey, data: Arc<CurveData>);

    /// Returns `false` when the backend cannot currently serve requests.
    ///
    /// Callers skip both lookup and insertion when unavailable and compute
    /// the curve directly.
    fn is_available(&self) -> bool;
}
