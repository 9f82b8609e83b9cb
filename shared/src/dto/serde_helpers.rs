//! Lenient deserializers for fields the API is inconsistent about.
//!
//! Decimal columns come back as JSON numbers from some endpoints and as
//! numeric strings from others; date columns come back either as plain
//! dates or as full timestamps.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Deserialize an amount from a JSON number or a numeric string.
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => Ok(value),
        RawAmount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("invalid amount {:?}: {}", text, e))),
    }
}

/// Deserialize a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let day = text.get(..10).unwrap_or(&text);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| D::Error::custom(format!("invalid date {:?}: {}", text, e)))
}
