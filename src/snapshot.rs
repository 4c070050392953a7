//! Dashboard snapshot model
//!
//! The statistics endpoint gives no schema guarantees, so the payload is read
//! once, field by field, into a structure where every value is optional. A field
//! of the wrong JSON type is treated as absent. Only a body that is not JSON, or
//! whose top level is not an object, is rejected.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The body could not be parsed as JSON at all.
    #[error("Response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is JSON, but not an object.
    #[error("Expected a JSON object at the top level, got {0}")]
    NotAnObject(&'static str),
}

/// One fetched copy of the dashboard statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
    #[serde(default, deserialize_with = "lenient::objects", skip_serializing_if = "Option::is_none")]
    pub category_distribution: Option<Vec<CategoryEntry>>,
    #[serde(default, deserialize_with = "lenient::objects", skip_serializing_if = "Option::is_none")]
    pub toxicity_data: Option<Vec<ToxicityEntry>>,
    #[serde(default, deserialize_with = "lenient::objects", skip_serializing_if = "Option::is_none")]
    pub trending_fake: Option<Vec<NewsItem>>,
    #[serde(default, deserialize_with = "lenient::objects", skip_serializing_if = "Option::is_none")]
    pub trending_real: Option<Vec<NewsItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub total_scraped: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub fake_detected: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub real_verified: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub active_monitors: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::threat_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub threat_level: Option<ThreatLevel>,
}

/// Coarse severity reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    /// Any other label, kept verbatim (the backend emits "Moderate").
    Other(String),
}

impl ThreatLevel {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Low" => ThreatLevel::Low,
            "Medium" => ThreatLevel::Medium,
            "High" => ThreatLevel::High,
            other => ThreatLevel::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ThreatLevel::Low => "Low",
            ThreatLevel::Medium => "Medium",
            ThreatLevel::High => "High",
            ThreatLevel::Other(raw) => raw,
        }
    }
}

impl Serialize for ThreatLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::non_negative",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToxicityEntry {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Opaque item identifier; the backend uses database row ids but nothing
/// downstream depends on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(default, deserialize_with = "lenient::item_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default, deserialize_with = "lenient::rank", skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Likelihood that the claim is fake, 0..=100.
    #[serde(default, deserialize_with = "lenient::score", skip_serializing_if = "Option::is_none")]
    pub fake_score: Option<f64>,
    /// Credibility of a verified report, 0..=100.
    #[serde(default, deserialize_with = "lenient::score", skip_serializing_if = "Option::is_none")]
    pub credibility_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient::texts", skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::texts", skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<String>>,
}

impl DashboardSnapshot {
    /// Parses a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(&value)
    }

    /// Reads a snapshot out of an already-parsed JSON document.
    pub fn from_value(value: &Value) -> Result<Self, SnapshotError> {
        if !value.is_object() {
            return Err(SnapshotError::NotAnObject(json_kind(value)));
        }
        Ok(Self::deserialize(value)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `deserialize_with` helpers that yield `None` instead of failing on a type
/// mismatch. Each one buffers the field as a [`Value`] first.
mod lenient {
    use super::{ItemId, ThreatLevel};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    type Field<T, E> = Result<Option<T>, E>;

    fn non_blank(value: &Value) -> Option<String> {
        value
            .as_str()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    }

    fn whole_number(value: &Value) -> Option<u64> {
        if let Some(n) = value.as_u64() {
            return Some(n);
        }
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
            .map(|n| n as u64)
    }

    pub fn object<'de, D, T>(deserializer: D) -> Field<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Ok(None);
        }
        Ok(serde_json::from_value(value).ok())
    }

    /// Array of objects; elements that are not objects are skipped.
    pub fn objects<'de, D, T>(deserializer: D) -> Field<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let Value::Array(items) = Value::deserialize(deserializer)? else {
            return Ok(None);
        };
        Ok(Some(
            items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Field<String, D::Error> {
        Ok(non_blank(&Value::deserialize(deserializer)?))
    }

    pub fn texts<'de, D: Deserializer<'de>>(deserializer: D) -> Field<Vec<String>, D::Error> {
        let Value::Array(items) = Value::deserialize(deserializer)? else {
            return Ok(None);
        };
        Ok(Some(items.iter().filter_map(non_blank).collect()))
    }

    /// Non-negative whole number; `12.0` is accepted, `12.5` is not.
    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Field<u64, D::Error> {
        Ok(whole_number(&Value::deserialize(deserializer)?))
    }

    pub fn rank<'de, D: Deserializer<'de>>(deserializer: D) -> Field<u32, D::Error> {
        Ok(count(deserializer)?.and_then(|rank| u32::try_from(rank).ok()))
    }

    /// Finite, non-negative number.
    pub fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Field<f64, D::Error> {
        Ok(Value::deserialize(deserializer)?
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0))
    }

    /// Percentage clamped into 0..=100.
    pub fn score<'de, D: Deserializer<'de>>(deserializer: D) -> Field<f64, D::Error> {
        Ok(Value::deserialize(deserializer)?
            .as_f64()
            .filter(|n| n.is_finite())
            .map(|n| n.clamp(0.0, 100.0)))
    }

    pub fn threat_level<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Field<ThreatLevel, D::Error> {
        Ok(non_blank(&Value::deserialize(deserializer)?).map(|raw| ThreatLevel::parse(&raw)))
    }

    pub fn item_id<'de, D: Deserializer<'de>>(deserializer: D) -> Field<ItemId, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().map(ItemId::Number),
            Value::String(s) if !s.trim().is_empty() => Some(ItemId::Text(s)),
            _ => None,
        })
    }
}
