//! Serde helpers encoding big integers as decimal strings.
//!
//! JSON numbers lose precision above 2^53, so every on-chain integer that
//! crosses a serialization boundary is written as a base-10 string. Use
//! with `#[serde(with = "crate::serde_decimal")]` on any field whose type
//! implements `Display` and `FromStr` (`U256`, `I256`, `u128`, ...).
//!
//! [`option`] handles `Option<T>` fields the same way.

use core::fmt::Display;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serializer};

/// Serializes `value` as its decimal `Display` string.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Deserializes a decimal string into `T`.
///
/// # Errors
///
/// Fails if the input is not a string or does not parse as `T`.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim().parse::<T>().map_err(serde::de::Error::custom)
}

/// Decimal-string encoding for optional values (`null` stays `null`).
pub mod option {
    use super::{Deserialize, Deserializer, Display, FromStr, Serializer};

    /// Serializes `Some(v)` as a decimal string and `None` as `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional decimal string.
    ///
    /// # Errors
    ///
    /// Fails if a present value does not parse as `T`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| s.trim().parse::<T>().map_err(serde::de::Error::custom))
            .transpose()
    }
}
