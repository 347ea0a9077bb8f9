//! Trip API response DTOs.
//!
//! Timeline records arrive loosely typed: a `type` tag, a sequence number
//! and a free-form `payload` object. They are turned into typed
//! `TimelineEntry` values by `convert`.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Response from the trip timeline endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    /// Stints in arbitrary order.
    #[serde(default)]
    pub stints: Vec<RawStint>,
}

/// A stint as stored remotely.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStint {
    pub stint_id: String,

    /// Unique within the trip.
    pub sequence_number: u32,

    #[serde(default)]
    pub name: String,

    /// Free text or a number, depending on how the stint was created.
    #[serde(default, deserialize_with = "text_or_number")]
    pub distance: Option<String>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub estimated_duration: Option<String>,

    pub notes: Option<String>,

    /// Timeline records in arbitrary order.
    #[serde(default)]
    pub timeline: Vec<RawTimelineItem>,
}

/// A timeline record before its payload is interpreted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimelineItem {
    /// `departure`, `stop` or `leg`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Unique within the stint.
    pub sequence_number: u32,

    #[serde(default)]
    pub payload: Map<String, Value>,
}

/// Accept a display value sent either as a string or as a bare number.
pub(super) fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
