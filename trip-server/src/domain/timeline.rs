//! Timeline entries within a stint.
//!
//! Each entry kind carries only the fields relevant to it. Entries are
//! ordered within their stint by `sequence`.

use chrono::{Duration, NaiveDateTime};

/// Leaving the stint's starting point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub sequence: u32,
    pub location: String,
    pub departure_time: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

/// A named location visited within a stint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub sequence: u32,
    pub location: String,
    pub arrival_time: Option<NaiveDateTime>,
    pub departure_time: Option<NaiveDateTime>,
    /// Planned dwell time in minutes, when given explicitly.
    pub duration_mins: Option<u32>,
    pub notes: Option<String>,
}

impl Stop {
    /// Dwell time at this stop.
    ///
    /// Prefers the explicit duration; otherwise derives it from the
    /// arrival and departure times when both are known.
    pub fn dwell(&self) -> Option<Duration> {
        if let Some(mins) = self.duration_mins {
            return Some(Duration::minutes(i64::from(mins)));
        }
        match (self.arrival_time, self.departure_time) {
            (Some(arr), Some(dep)) if dep >= arr => Some(dep - arr),
            _ => None,
        }
    }
}

/// Travel between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub sequence: u32,
    pub from: String,
    pub to: String,
    /// Human-readable distance, e.g. "212 mi".
    pub distance: Option<String>,
    /// Human-readable duration, e.g. "3 hours 40 mins".
    pub duration: Option<String>,
}

/// One entry in a stint's timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineEntry {
    Departure(Departure),
    Stop(Stop),
    Leg(Leg),
}

impl TimelineEntry {
    /// Position of this entry among its siblings.
    pub fn sequence(&self) -> u32 {
        match self {
            TimelineEntry::Departure(d) => d.sequence,
            TimelineEntry::Stop(s) => s.sequence,
            TimelineEntry::Leg(l) => l.sequence,
        }
    }

    /// Short name of the entry kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TimelineEntry::Departure(_) => "departure",
            TimelineEntry::Stop(_) => "stop",
            TimelineEntry::Leg(_) => "leg",
        }
    }

    /// Returns the stop if this entry is one.
    pub fn as_stop(&self) -> Option<&Stop> {
        match self {
            TimelineEntry::Stop(stop) => Some(stop),
            _ => None,
        }
    }

    /// Returns the leg if this entry is one.
    pub fn as_leg(&self) -> Option<&Leg> {
        match self {
            TimelineEntry::Leg(leg) => Some(leg),
            _ => None,
        }
    }
}
