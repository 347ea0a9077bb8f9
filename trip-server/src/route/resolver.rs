//! Concurrent waypoint geocoding.
//!
//! Every waypoint is looked up at once. Each lookup is tagged with the
//! index of the waypoint it belongs to and writes only that index's slot,
//! so the slots need no locking. Slots are read back in index order once
//! all lookups have settled; arrival order never leaks into the output.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{GapReason, GeocodedPoint, ResolutionGap, Waypoint};

use super::cancel::{CancelToken, Cancelled};
use super::provider::{Geocoder, Place};

/// Outcome of resolving a list of waypoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Resolved points, ascending by `source_index`.
    pub markers: Vec<GeocodedPoint>,
    /// Waypoints that could not be resolved, ascending by `source_index`.
    pub gaps: Vec<ResolutionGap>,
}

impl Resolution {
    /// Returns true if every waypoint resolved.
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// Resolves ordered waypoints into geocoded markers.
///
/// A failed or empty lookup only removes its own waypoint from the
/// markers; sibling lookups are unaffected. No retries are made and no
/// timeout is added beyond what the geocoder enforces.
pub struct WaypointResolver<'a, G: Geocoder> {
    geocoder: &'a G,
}

impl<'a, G: Geocoder + Sync> WaypointResolver<'a, G> {
    pub fn new(geocoder: &'a G) -> Self {
        Self { geocoder }
    }

    /// Resolve all waypoints concurrently, preserving input order.
    ///
    /// Resolving nothing is not an error: with no resolvable waypoints
    /// the markers are simply empty.
    pub async fn resolve(&self, waypoints: &[Waypoint]) -> Resolution {
        let lookups = waypoints.iter().enumerate().map(|(index, waypoint)| async move {
            if waypoint.is_blank() {
                return (index, Ok(None));
            }
            (index, self.geocoder.geocode(&waypoint.text).await)
        });

        // Barrier: nothing is read back until every lookup has settled.
        let settled = join_all(lookups).await;

        let mut slots: Vec<Option<Place>> = vec![None; waypoints.len()];
        let mut gaps = Vec::new();

        for (index, outcome) in settled {
            let reason = match outcome {
                Ok(Some(place)) => {
                    slots[index] = Some(place);
                    continue;
                }
                Ok(None) => GapReason::NotFound,
                Err(e) => GapReason::Failed(e.to_string()),
            };

            warn!(
                source_index = index,
                waypoint = %waypoints[index].text,
                reason = %reason,
                "waypoint could not be resolved"
            );
            gaps.push(ResolutionGap {
                source_index: index,
                waypoint_id: waypoints[index].id.clone(),
                reason,
            });
        }
        gaps.sort_by_key(|gap| gap.source_index);

        let markers: Vec<GeocodedPoint> = slots
            .into_iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.map(|place| GeocodedPoint {
                    source_index: index,
                    waypoint_id: waypoints[index].id.clone(),
                    label: place
                        .label
                        .unwrap_or_else(|| waypoints[index].text.clone()),
                    latitude: place.latitude,
                    longitude: place.longitude,
                })
            })
            .collect();

        debug!(
            requested = waypoints.len(),
            resolved = markers.len(),
            "waypoint resolution complete"
        );

        Resolution { markers, gaps }
    }

    /// Like [`resolve`](Self::resolve), but gives up as soon as `cancel`
    /// fires, dropping any lookups still in flight.
    pub async fn resolve_until(
        &self,
        waypoints: &[Waypoint],
        cancel: &CancelToken,
    ) -> Result<Resolution, Cancelled> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Cancelled),
            resolution = self.resolve(waypoints) => Ok(resolution),
        }
    }
}
