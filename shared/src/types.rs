//! Common types for the shared crate
//!
//! Identifier and date helpers used by every model.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Record identifier.
///
/// The backend is inconsistent about id encoding: the same foreign key may
/// arrive as `1` in one payload and `"1"` in another. `RecordId` accepts both
/// and compares by the string form, so `RecordId::from(1) == RecordId::from("1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is blank (e.g. an unselected `<option value="">`).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Canonical numeric ids go back out as numbers; "007" stays a string.
        match self.0.parse::<i64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => RecordId::from(n),
            Raw::Float(f) if f.fract() == 0.0 => RecordId::from(f as i64),
            Raw::Float(f) => RecordId::new(f.to_string()),
            Raw::Text(s) => RecordId::new(s),
        })
    }
}

/// Deserialize an optional foreign key, mapping `null` and `""` to `None`.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<RecordId>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_empty()))
}

/// Reduce a backend date or timestamp to its calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339 strings.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Deserialize a required record date with [`parse_record_date`].
pub fn record_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_record_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date {raw:?}")))
}

/// Deserialize an optional record date. Blank and unreadable values become `None`.
pub fn optional_record_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_record_date))
}
