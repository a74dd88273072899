//! Declarative, validated inputs.
//!
//! These structs are what a tracking service hands the engine: the pool's
//! `slot0` snapshot, a stored position record and curve rendering options.
//! Each is built with `new(..)`, re-checkable with `validate()` and
//! deserializable from JSON with big integers as decimal strings.
//! Deserialization runs the same validation as `new`.

mod curve;
mod pool;
mod position;

pub use curve::CurveConfig;
pub use pool::PoolSnapshot;
pub use position::PositionConfig;
