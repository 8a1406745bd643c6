pub mod bmi;
pub mod plan;
pub mod task;
pub mod user;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a number that may arrive either as a JSON number or a numeric string.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from))
}

/// Whole, non-negative counterpart of `lenient_f64`.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from)
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

/// Reads an optional enum tag. Blank strings and tags this build does not
/// know read as absent.
pub(crate) fn lenient_tag<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(tag_from))
}

/// Reads a list of enum tags, skipping the ones this build does not know.
pub(crate) fn known_tags<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let tags = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(tag_from).collect(),
        _ => Vec::new(),
    };
    Ok(tags)
}

fn tag_from<T: DeserializeOwned>(value: Value) -> Option<T> {
    match &value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        _ => serde_json::from_value(value.clone())
            .map_err(|_| debug!("Skipping unknown tag {}", value))
            .ok(),
    }
}

pub(crate) fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}
