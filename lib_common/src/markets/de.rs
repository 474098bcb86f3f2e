//! Serde helpers for the quirks of exchange JSON: decimal numbers sent as
//! strings and epoch-millisecond timestamps.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Accepts `"67012.50"` as well as `67012.5`.
pub(crate) fn f64_from_str_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid decimal '{s}': {e}"))),
    }
}

/// Converts Unix milliseconds (integer or float) into `DateTime<Utc>`.
pub(crate) fn deserialize_ms_to_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = f64_from_str_or_number(deserializer)?;
    Utc.timestamp_millis_opt(ms as i64)
        .single()
        .ok_or_else(|| serde::de::Error::custom("invalid timestamp"))
}
