//! Lenient deserialization of currency amounts.
//!
//! The API serializes decimal columns as strings (`"12.50"`) while some
//! fields arrive as plain JSON numbers or `null`. Both shapes are accepted.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn into_value(self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Amount that treats missing, null or unparsable input as zero.
pub fn lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(raw.and_then(RawAmount::into_value).unwrap_or(0.0))
}

/// Amount that is `None` when missing, null or unparsable.
pub fn optional<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(raw.and_then(RawAmount::into_value))
}
