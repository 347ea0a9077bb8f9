//! Data transfer objects for web requests and responses.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    GeocodedPoint, Itinerary, PathPoint, ResolutionGap, Route, Stint, TimelineEntry, Waypoint,
};
use crate::route::RouteRequest;

/// Request to build a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequestBody {
    pub origin: String,
    pub destination: String,

    /// Intermediate stops in travel order
    #[serde(default)]
    pub waypoints: Vec<String>,
}

impl RouteRequestBody {
    /// Convert into a route request.
    ///
    /// Waypoint ids are positional: `origin`, `waypoint-1`.. and
    /// `destination`.
    pub fn into_request(self) -> RouteRequest {
        let waypoints = self
            .waypoints
            .into_iter()
            .enumerate()
            .map(|(i, text)| Waypoint::new(format!("waypoint-{}", i + 1), text))
            .collect();

        RouteRequest::new(
            Waypoint::new("origin", self.origin),
            Waypoint::new("destination", self.destination),
            waypoints,
        )
    }
}

/// A point on the route path.
#[derive(Debug, Serialize)]
pub struct PointDto {
    pub lat: f64,
    pub lng: f64,
}

impl From<&PathPoint> for PointDto {
    fn from(p: &PathPoint) -> Self {
        Self {
            lat: p.latitude,
            lng: p.longitude,
        }
    }
}

/// A geocoded location marker.
#[derive(Debug, Serialize)]
pub struct MarkerDto {
    pub source_index: usize,
    pub waypoint_id: String,
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<&GeocodedPoint> for MarkerDto {
    fn from(m: &GeocodedPoint) -> Self {
        Self {
            source_index: m.source_index,
            waypoint_id: m.waypoint_id.clone(),
            label: m.label.clone(),
            lat: m.latitude,
            lng: m.longitude,
        }
    }
}

/// A location that could not be placed on the map.
#[derive(Debug, Serialize)]
pub struct GapDto {
    pub source_index: usize,
    pub waypoint_id: String,
    pub reason: String,
}

impl From<&ResolutionGap> for GapDto {
    fn from(g: &ResolutionGap) -> Self {
        Self {
            source_index: g.source_index,
            waypoint_id: g.waypoint_id.clone(),
            reason: g.reason.to_string(),
        }
    }
}

/// Response for a built route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub path: Vec<PointDto>,
    pub markers: Vec<MarkerDto>,
    /// Human-readable distance of the first leg
    pub distance: String,
    pub unresolved: Vec<GapDto>,
}

impl RouteResponse {
    pub fn from_route(route: &Route) -> Self {
        Self {
            path: route.path.iter().map(PointDto::from).collect(),
            markers: route.markers.iter().map(MarkerDto::from).collect(),
            distance: route.distance_label.clone(),
            unresolved: route.unresolved.iter().map(GapDto::from).collect(),
        }
    }
}

/// A timeline entry, tagged by kind.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryDto {
    Departure {
        sequence: u32,
        location: String,
        departure_time: Option<String>,
        notes: Option<String>,
    },
    Stop {
        sequence: u32,
        location: String,
        arrival_time: Option<String>,
        departure_time: Option<String>,
        /// Minutes spent at the stop, explicit or derived from the times
        dwell_mins: Option<i64>,
        notes: Option<String>,
    },
    Leg {
        sequence: u32,
        from: String,
        to: String,
        distance: Option<String>,
        duration: Option<String>,
    },
}

fn format_time(time: Option<NaiveDateTime>) -> Option<String> {
    time.map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string())
}

impl From<&TimelineEntry> for EntryDto {
    fn from(entry: &TimelineEntry) -> Self {
        match entry {
            TimelineEntry::Departure(d) => EntryDto::Departure {
                sequence: d.sequence,
                location: d.location.clone(),
                departure_time: format_time(d.departure_time),
                notes: d.notes.clone(),
            },
            TimelineEntry::Stop(s) => EntryDto::Stop {
                sequence: s.sequence,
                location: s.location.clone(),
                arrival_time: format_time(s.arrival_time),
                departure_time: format_time(s.departure_time),
                dwell_mins: s.dwell().map(|d| d.num_minutes()),
                notes: s.notes.clone(),
            },
            TimelineEntry::Leg(l) => EntryDto::Leg {
                sequence: l.sequence,
                from: l.from.clone(),
                to: l.to.clone(),
                distance: l.distance.clone(),
                duration: l.duration.clone(),
            },
        }
    }
}

/// A stint with its ordered timeline.
#[derive(Debug, Serialize)]
pub struct StintDto {
    pub id: String,
    pub sequence: u32,
    pub name: String,
    pub distance: Option<String>,
    pub estimated_duration: Option<String>,
    pub notes: Option<String>,
    pub stop_count: usize,
    pub timeline: Vec<EntryDto>,
}

impl From<&Stint> for StintDto {
    fn from(s: &Stint) -> Self {
        Self {
            id: s.id.to_string(),
            sequence: s.sequence,
            name: s.name.clone(),
            distance: s.distance.clone(),
            estimated_duration: s.estimated_duration.clone(),
            notes: s.notes.clone(),
            stop_count: s.stop_count(),
            timeline: s.timeline().iter().map(EntryDto::from).collect(),
        }
    }
}

/// Response for a trip itinerary.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub trip_id: String,
    pub stints: Vec<StintDto>,
    /// Sequence number to use for the next stint added to the trip
    pub next_stint_sequence: u32,
    /// Default stint for new stops
    pub latest_stint_id: Option<String>,
}

impl ItineraryResponse {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            trip_id: itinerary.trip_id().to_string(),
            stints: itinerary.stints().iter().map(StintDto::from).collect(),
            next_stint_sequence: itinerary.next_stint_sequence(),
            latest_stint_id: itinerary.latest_stint().map(|s| s.id.to_string()),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Departure, GapReason, Stop};
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn route_body_assigns_positional_ids() {
        let body: RouteRequestBody = serde_json::from_value(json!({
            "origin": "Portland, OR",
            "destination": "Boise, ID",
            "waypoints": ["Bend, OR", "Burns, OR"]
        }))
        .unwrap();

        let request = body.into_request();
        let ids: Vec<String> = request.locations().into_iter().map(|w| w.id).collect();
        assert_eq!(ids, vec!["origin", "waypoint-1", "waypoint-2", "destination"]);
        assert_eq!(request.waypoints[1].text, "Burns, OR");
    }

    #[test]
    fn waypoints_default_to_empty() {
        let body: RouteRequestBody =
            serde_json::from_value(json!({"origin": "A", "destination": "B"})).unwrap();
        assert!(body.into_request().waypoints.is_empty());
    }

    #[test]
    fn route_response_shape() {
        let route = Route {
            path: vec![PathPoint::new(38.5, -120.2)],
            markers: vec![GeocodedPoint {
                source_index: 0,
                waypoint_id: "origin".into(),
                label: "Sacramento, CA".into(),
                latitude: 38.58,
                longitude: -121.49,
            }],
            distance_label: "12.3 mi".into(),
            unresolved: vec![ResolutionGap {
                source_index: 1,
                waypoint_id: "destination".into(),
                reason: GapReason::NotFound,
            }],
        };

        let value = serde_json::to_value(RouteResponse::from_route(&route)).unwrap();
        assert_eq!(
            value,
            json!({
                "path": [{"lat": 38.5, "lng": -120.2}],
                "markers": [{
                    "source_index": 0,
                    "waypoint_id": "origin",
                    "label": "Sacramento, CA",
                    "lat": 38.58,
                    "lng": -121.49
                }],
                "distance": "12.3 mi",
                "unresolved": [{"source_index": 1, "waypoint_id": "destination", "reason": "not found"}]
            })
        );
    }

    #[test]
    fn entries_are_tagged_by_kind() {
        let at = |h, m| {
            NaiveDate::from_ymd_opt(2024, 7, 4)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap()
        };

        let departure = EntryDto::from(&TimelineEntry::Departure(Departure {
            sequence: 1,
            location: "Reno, NV".into(),
            departure_time: Some(at(8, 0)),
            notes: None,
        }));
        assert_eq!(
            serde_json::to_value(departure).unwrap(),
            json!({
                "type": "departure",
                "sequence": 1,
                "location": "Reno, NV",
                "departure_time": "2024-07-04T08:00:00",
                "notes": null
            })
        );

        let stop = EntryDto::from(&TimelineEntry::Stop(Stop {
            sequence: 2,
            location: "Ely, NV".into(),
            arrival_time: Some(at(12, 0)),
            departure_time: Some(at(12, 45)),
            duration_mins: None,
            notes: None,
        }));
        let value = serde_json::to_value(stop).unwrap();
        assert_eq!(value["type"], "stop");
        assert_eq!(value["dwell_mins"], 45);
    }

    #[test]
    fn times_keep_their_seconds() {
        let parsed = crate::trips::parse_time("2024-07-04T08:30:45").unwrap();
        assert_eq!(format_time(Some(parsed)).as_deref(), Some("2024-07-04T08:30:45"));
        assert_eq!(format_time(None), None);
    }
}
