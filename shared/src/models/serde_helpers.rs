//! Common serde helpers for documents coming back from the store
//!
//! Legacy documents can miss fields entirely or carry explicit nulls. All
//! defaulting happens here, once, at the deserialization boundary — business
//! logic never has to reason about absent fields.

use serde::{Deserialize, Deserializer};

/// Deserialize a bool that treats null as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

/// Deserialize an f64 that treats null as 0.0
pub fn f64_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(|opt| opt.unwrap_or(0.0))
}

/// Deserialize an i64 that treats null as 0
pub fn i64_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(|opt| opt.unwrap_or(0))
}

/// Deserialize a string that treats null as empty
pub fn string_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}
