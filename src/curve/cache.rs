//! Curve cache key, built-in cache backends and the check-then-compute
//! helper.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::point::CurveData;
use crate::domain::Price;
use crate::error::PositionMathError;
use crate::traits::CurveCache;

/// Identifies one cached curve: a position evaluated around a given pool
/// price. A new current price means a new curve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveCacheKey {
    position_id: String,
    current_price: Price,
}

impl CurveCacheKey {
    /// Creates a key.
    #[must_use]
    pub fn new(position_id: impl Into<String>, current_price: Price) -> Self {
        Self {
            position_id: position_id.into(),
            current_price,
        }
    }

    /// Caller-assigned position identifier.
    #[must_use]
    pub fn position_id(&self) -> &str {
        &self.position_id
    }

    /// Pool price the curve was built around.
    #[must_use]
    pub const fn current_price(&self) -> Price {
        self.current_price
    }
}

/// Process-local cache backed by a `RwLock<HashMap>`.
///
/// With a capacity set, inserting a new key into a full cache clears it
/// first.
///
/// A poisoned lock makes the cache report itself unavailable.
#[derive(Debug, Default)]
pub struct InMemoryCurveCache {
    entries: RwLock<HashMap<CurveCacheKey, Arc<CurveData>>>,
    capacity: Option<usize>,
}

impl InMemoryCurveCache {
    /// Creates an unbounded cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache holding at most `capacity` curves.
    ///
    /// # Errors
    ///
    /// Returns [`PositionMathError::InvalidConfiguration`] if `capacity`
    /// is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, PositionMathError> {
        if capacity == 0 {
            return Err(PositionMathError::InvalidConfiguration(
                "cache capacity must be non-zero",
            ));
        }
        Ok(Self {
            entries: RwLock::new(HashMap::with_capacity(capacity)),
            capacity: Some(capacity),
        })
    }

    /// Number of cached curves (zero if the lock is poisoned).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |map| map.len())
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry.
    pub fn clear(&self) {
        if let Ok(mut map) = self.entries.write() {
            map.clear();
        }
    }
}

impl CurveCache for InMemoryCurveCache {
    fn get(&self, key: &CurveCacheKey) -> Option<Arc<CurveData>> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: CurveCacheKey, data: Arc<CurveData>) {
        let Ok(mut map) = self.entries.write() else {
            warn!("curve cache lock poisoned; dropping insert");
            return;
        };
        if let Some(capacity) = self.capacity {
            if map.len() >= capacity && !map.contains_key(&key) {
                debug!(capacity, "curve cache full; clearing");
                map.clear();
            }
        }
        map.insert(key, data);
    }

    fn is_available(&self) -> bool {
        !self.entries.is_poisoned()
    }
}

/// A cache that stores nothing and always reports itself unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopCurveCache;

impl CurveCache for NoopCurveCache {
    fn get(&self, _key: &CurveCacheKey) -> Option<Arc<CurveData>> {
        None
    }

    fn set(&self, _key: CurveCacheKey, _data: Arc<CurveData>) {}

    fn is_available(&self) -> bool {
        false
    }
}

/// Returns the cached curve for `key`, or builds, stores and returns it.
///
/// An unavailable cache is bypassed entirely. Build errors are returned
/// and nothing is stored.
///
/// # Errors
///
/// Propagates any error from `build`.
pub fn cached_curve_data<F>(
    cache: &dyn CurveCache,
    key: CurveCacheKey,
    build: F,
) -> Result<Arc<CurveData>, PositionMathError>
where
    F: FnOnce() -> Result<CurveData, PositionMathError>,
{
    if !cache.is_available() {
        debug!(position_id = key.position_id(), "curve cache unavailable");
        return build().map(Arc::new);
    }
    if let Some(hit) = cache.get(&key) {
        debug!(position_id = key.position_id(), "curve cache hit");
        return Ok(hit);
    }
    debug!(position_id = key.position_id(), "curve cache miss");
    let data = Arc::new(build()?);
    cache.set(key, Arc::clone(&data));
    Ok(data)
}
