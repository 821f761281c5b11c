//! Record types supplied by the data-access layer, plus the shared
//! parameter type analysts tune per request.
//!
//! Every numeric field is optional: upstream rows routinely carry nulls,
//! and the scorers treat an absent value as 0 rather than rejecting the row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of a firm row.
pub type FirmId = i64;

/// Identifier of any other upstream row (forecasts, entrepreneurs).
pub type RecordId = i64;

/// Display name used when a record carries none.
pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirmRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: FirmId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Tons of waste produced.
    #[serde(default, deserialize_with = "lenient::number")]
    pub waste_volume: Option<f64>,
    /// Recycling rate on the 0–100 scale.
    #[serde(default, deserialize_with = "lenient::number")]
    pub recycling_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub revenue: Option<f64>,
}

impl FirmRecord {
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref())
    }
}

/// A time-stamped forecast snapshot. Several exist per firm; only the
/// newest one is ever used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::id")]
    pub firm_id: FirmId,
    #[serde(default, deserialize_with = "lenient::number")]
    pub forecast_return: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sustainability_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntrepreneurRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Either a 0–1 fraction or a 0–100 percentage.
    #[serde(default, deserialize_with = "lenient::number")]
    pub women_ratio: Option<f64>,
    /// Either a 0–1 fraction or a 0–100 percentage.
    #[serde(default, deserialize_with = "lenient::number")]
    pub disabled_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient::year")]
    pub established_year: Option<i32>,
}

impl EntrepreneurRecord {
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref())
    }
}

/// Reference values for entrepreneur scoring. Ratios are given on the
/// caller's native scale (usually 0–100) and normalized by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParameters {
    pub ref_women_ratio: f64,
    pub ref_disabled_ratio: f64,
    pub ref_min_year: i32,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        Self {
            ref_women_ratio: 30.0,
            ref_disabled_ratio: 5.0,
            ref_min_year: 2015,
        }
    }
}

pub(crate) fn display_name(name: Option<&str>) -> &str {
    match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => UNKNOWN_NAME,
    }
}

/// Tolerant field and collection deserializers.
///
/// A field of the wrong JSON type reads as absent instead of failing the
/// whole record; a collection entry that cannot be read at all (including
/// `null`) is dropped.
pub mod lenient {
    use chrono::{DateTime, Utc};
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    fn as_number(value: &Value) -> Option<f64> {
        let n = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        n.filter(|n| n.is_finite())
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(as_number))
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(as_number).map(|n| n as i64).unwrap_or(0))
    }

    pub fn year<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(value.as_ref().and_then(as_number).map(|n| n.trunc() as i32))
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
    }

    pub fn timestamp<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Option::<Value>::deserialize(d)?;
        Ok(match value {
            Some(Value::String(s)) => parse_timestamp(&s),
            _ => None,
        })
    }

    /// Parse an RFC 3339 timestamp, or `None` when it is malformed.
    pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Read a JSON array, keeping only the entries that parse as `T`.
    pub fn present<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let raw = Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default();
        let total = raw.len();
        let kept: Vec<T> = raw
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();
        if kept.len() < total {
            log::warn!("dropped {} unreadable entries of {total}", total - kept.len());
        }
        Ok(kept)
    }
}
