//! Tolerant deserializers for loosely-typed backend fields.
//!
//! Documents written by earlier clients are not uniformly typed: money may
//! arrive as a number or a numeric string, quantities as floats, and
//! timestamps as a backend timestamp object, an RFC 3339 string, a bare
//! date, or epoch milliseconds. Report data quality must never block a
//! read, so these helpers map anything unusable to `None` instead of
//! failing the whole document.
//!
//! Use with `#[serde(default, deserialize_with = "...")]` on `Option`
//! fields.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional money amount.
///
/// Accepts a JSON number, a numeric string, `null`, or an absent field.
/// Anything else reads as `None`.
pub fn opt_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

/// Deserialize an optional quantity.
///
/// Accepts a JSON number (floats truncate), a numeric string, `null`, or
/// an absent field. Negative or unusable values read as `None`.
pub fn opt_quantity<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(quantity_from_value))
}

/// Deserialize an optional timestamp.
///
/// Accepts a backend timestamp object (`{"seconds": .., "nanos": ..}` or
/// `{"_seconds": .., "_nanoseconds": ..}`), an RFC 3339 string, a bare
/// `YYYY-MM-DD` date, or epoch milliseconds. Anything else reads as
/// `None`.
pub fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(datetime_from_value))
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        // Parsing the number's decimal text keeps "12.5" exact where a
        // round-trip through f64 would not.
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64_retain)),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn quantity_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn datetime_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))?
                .as_i64()?;
            let nanos = map
                .get("nanos")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_i64)
                .unwrap_or(0);
            let nanos = u32::try_from(nanos).unwrap_or(0);
            DateTime::from_timestamp(seconds, nanos)
        }
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|ndt| ndt.and_utc())
                })
        }
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}
