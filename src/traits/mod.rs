//! Core trait abstractions.
//!
//! - [`CurveCache`]: injectable storage for computed PnL curves.
//! - [`FromConfig`]: validated construction from declarative configuration.

mod curve_cache;
mod from_config;

pub use curve_cache::CurveCache;
pub use from_config::FromConfig;
