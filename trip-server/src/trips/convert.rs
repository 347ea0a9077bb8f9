//! Conversion from trip API records to domain types.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{Departure, Leg, Stop, TimelineEntry};

use super::types::{RawTimelineItem, text_or_number};

/// Formats accepted for timeline times without an offset.
const NAIVE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Error converting a timeline record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The `type` tag is not a known entry kind.
    #[error("unknown timeline entry type '{0}'")]
    UnknownKind(String),

    /// The payload is missing fields or has the wrong shape for its kind.
    #[error("invalid {kind} payload at sequence {sequence}: {message}")]
    InvalidPayload {
        kind: &'static str,
        sequence: u32,
        message: String,
    },

    /// A time field could not be parsed.
    #[error("invalid time '{value}' at sequence {sequence}")]
    InvalidTime { sequence: u32, value: String },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeparturePayload {
    location: String,
    departure_time: Option<String>,
    notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StopPayload {
    location: String,
    arrival_time: Option<String>,
    departure_time: Option<String>,
    duration_mins: Option<u32>,
    notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegPayload {
    from: String,
    to: String,
    #[serde(default, deserialize_with = "text_or_number")]
    distance: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    duration: Option<String>,
}

/// Convert a loosely-typed timeline record into a typed entry.
///
/// The `type` tag is matched case-insensitively.
pub fn convert_entry(item: &RawTimelineItem) -> Result<TimelineEntry, ConversionError> {
    let sequence = item.sequence_number;

    match item.kind.to_ascii_lowercase().as_str() {
        "departure" => {
            let p: DeparturePayload = payload(item, "departure")?;
            Ok(TimelineEntry::Departure(Departure {
                sequence,
                location: p.location,
                departure_time: parse_optional_time(p.departure_time, sequence)?,
                notes: non_empty(p.notes),
            }))
        }
        "stop" => {
            let p: StopPayload = payload(item, "stop")?;
            Ok(TimelineEntry::Stop(Stop {
                sequence,
                location: p.location,
                arrival_time: parse_optional_time(p.arrival_time, sequence)?,
                departure_time: parse_optional_time(p.departure_time, sequence)?,
                duration_mins: p.duration_mins,
                notes: non_empty(p.notes),
            }))
        }
        "leg" => {
            let p: LegPayload = payload(item, "leg")?;
            Ok(TimelineEntry::Leg(Leg {
                sequence,
                from: p.from,
                to: p.to,
                distance: p.distance,
                duration: p.duration,
            }))
        }
        _ => Err(ConversionError::UnknownKind(item.kind.clone())),
    }
}

fn payload<T: DeserializeOwned>(
    item: &RawTimelineItem,
    kind: &'static str,
) -> Result<T, ConversionError> {
    serde_json::from_value(Value::Object(item.payload.clone())).map_err(|e| {
        ConversionError::InvalidPayload {
            kind,
            sequence: item.sequence_number,
            message: e.to_string(),
        }
    })
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

fn parse_optional_time(
    value: Option<String>,
    sequence: u32,
) -> Result<Option<NaiveDateTime>, ConversionError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_time(text)
            .map(Some)
            .ok_or_else(|| ConversionError::InvalidTime {
                sequence,
                value: text.to_string(),
            }),
    }
}

/// Parse a timeline time.
///
/// RFC 3339 times keep their local wall-clock time; the offset is dropped.
pub fn parse_time(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    NAIVE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn item(kind: &str, sequence: u32, payload: Value) -> RawTimelineItem {
        RawTimelineItem {
            kind: kind.to_string(),
            sequence_number: sequence,
            payload: payload.as_object().cloned().unwrap_or_default(),
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn converts_departure() {
        let entry = convert_entry(&item(
            "departure",
            1,
            json!({"location": "Portland, OR", "departureTime": "2024-07-04T08:30:00-07:00"}),
        ))
        .unwrap();

        assert_eq!(
            entry,
            TimelineEntry::Departure(Departure {
                sequence: 1,
                location: "Portland, OR".into(),
                departure_time: Some(at(8, 30)),
                notes: None,
            })
        );
    }

    #[test]
    fn converts_stop_with_naive_times() {
        let entry = convert_entry(&item(
            "Stop",
            3,
            json!({
                "location": "Crater Lake",
                "arrivalTime": "2024-07-04T12:00",
                "departureTime": "2024-07-04 13:15",
                "durationMins": 75,
                "notes": "lunch"
            }),
        ))
        .unwrap();

        let stop = entry.as_stop().unwrap();
        assert_eq!(stop.sequence, 3);
        assert_eq!(stop.arrival_time, Some(at(12, 0)));
        assert_eq!(stop.departure_time, Some(at(13, 15)));
        assert_eq!(stop.duration_mins, Some(75));
        assert_eq!(stop.notes.as_deref(), Some("lunch"));
    }

    #[test]
    fn converts_leg_with_numeric_distance() {
        let entry = convert_entry(&item(
            "LEG",
            2,
            json!({"from": "Portland, OR", "to": "Crater Lake", "distance": 250, "duration": "4 hours"}),
        ))
        .unwrap();

        let leg = entry.as_leg().unwrap();
        assert_eq!(leg.from, "Portland, OR");
        assert_eq!(leg.distance.as_deref(), Some("250"));
        assert_eq!(leg.duration.as_deref(), Some("4 hours"));
    }

    #[test]
    fn empty_time_and_notes_are_absent() {
        let entry = convert_entry(&item(
            "departure",
            1,
            json!({"location": "Home", "departureTime": "", "notes": "  "}),
        ))
        .unwrap();

        match entry {
            TimelineEntry::Departure(d) => {
                assert_eq!(d.departure_time, None);
                assert_eq!(d.notes, None);
            }
            other => panic!("expected departure, got {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            convert_entry(&item("fuel", 1, json!({}))),
            Err(ConversionError::UnknownKind("fuel".into()))
        );
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result = convert_entry(&item("leg", 4, json!({"from": "A"})));
        assert!(matches!(
            result,
            Err(ConversionError::InvalidPayload {
                kind: "leg",
                sequence: 4,
                ..
            })
        ));
    }

    #[test]
    fn bad_time_is_rejected() {
        let result = convert_entry(&item(
            "stop",
            5,
            json!({"location": "X", "arrivalTime": "noon-ish"}),
        ));
        assert_eq!(
            result,
            Err(ConversionError::InvalidTime {
                sequence: 5,
                value: "noon-ish".into()
            })
        );
    }

    #[test]
    fn parse_time_formats() {
        assert_eq!(parse_time("2024-07-04T08:30:00Z"), Some(at(8, 30)));
        assert_eq!(parse_time("2024-07-04T08:30:00"), Some(at(8, 30)));
        assert_eq!(parse_time("2024-07-04T08:30"), Some(at(8, 30)));
        assert_eq!(parse_time("08:30"), None);
    }
}
