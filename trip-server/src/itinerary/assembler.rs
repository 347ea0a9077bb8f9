//! Stint and timeline ordering.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, warn};

use crate::domain::{Itinerary, MAX_SEQUENCE, Stint, StintId, TimelineEntry, TripId};
use crate::trips::{ConversionError, RawStint, RawTimelineItem, TripError, convert_entry};

use super::provider::TimelineProvider;

/// Error from itinerary assembly.
#[derive(Debug, thiserror::Error)]
pub enum ItineraryError {
    /// Two stints of the trip share a sequence number
    #[error("stints {first} and {duplicate} share sequence number {sequence}")]
    DuplicateStintSequence {
        sequence: u32,
        first: StintId,
        duplicate: StintId,
    },

    /// Two timeline entries of one stint share a sequence number
    #[error("stint {stint} has more than one timeline entry with sequence number {sequence}")]
    DuplicateEntrySequence { stint: StintId, sequence: u32 },

    /// A stint's sequence number leaves no room for a stint after it
    #[error("stint {stint} has sequence number {sequence}, above the maximum of {max}", max = MAX_SEQUENCE)]
    StintSequenceExhausted { stint: StintId, sequence: u32 },

    /// A timeline entry's sequence number leaves no room for an entry after it
    #[error("stint {stint} has a timeline entry with sequence number {sequence}, above the maximum of {max}", max = MAX_SEQUENCE)]
    EntrySequenceExhausted { stint: StintId, sequence: u32 },

    /// A timeline record could not be interpreted
    #[error("stint {stint}: {source}")]
    InvalidEntry {
        stint: StintId,
        #[source]
        source: ConversionError,
    },

    /// The timeline could not be fetched
    #[error(transparent)]
    Fetch(#[from] TripError),
}

/// Order a trip's raw stints into an itinerary.
///
/// Stints are sorted by sequence number, and each stint's timeline by
/// entry sequence number. Sequence numbers are never renumbered: a
/// repeated one fails the whole assembly. For stints, the one that arrives
/// later in `stints` is reported as the duplicate. So does a sequence
/// number above [`MAX_SEQUENCE`], which would leave nothing to append with.
pub fn assemble_itinerary(
    trip_id: TripId,
    stints: Vec<RawStint>,
) -> Result<Itinerary, ItineraryError> {
    let mut seen: HashMap<u32, StintId> = HashMap::with_capacity(stints.len());
    let mut built = Vec::with_capacity(stints.len());

    for raw in stints {
        let id = StintId::new(raw.stint_id);

        match seen.entry(raw.sequence_number) {
            Entry::Occupied(first) => {
                warn!(
                    trip = %trip_id,
                    sequence = raw.sequence_number,
                    first = %first.get(),
                    duplicate = %id,
                    "duplicate stint sequence number"
                );
                return Err(ItineraryError::DuplicateStintSequence {
                    sequence: raw.sequence_number,
                    first: first.get().clone(),
                    duplicate: id,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(id.clone());
            }
        }

        if raw.sequence_number > MAX_SEQUENCE {
            warn!(trip = %trip_id, stint = %id, sequence = raw.sequence_number, "stint sequence number out of range");
            return Err(ItineraryError::StintSequenceExhausted {
                stint: id,
                sequence: raw.sequence_number,
            });
        }

        let timeline = order_timeline(&id, &raw.timeline)?;

        built.push(Stint::from_ordered(
            id,
            raw.sequence_number,
            raw.name,
            raw.distance,
            raw.estimated_duration,
            raw.notes,
            timeline,
        ));
    }

    built.sort_by_key(|stint| stint.sequence);

    debug!(trip = %trip_id, stints = built.len(), "assembled itinerary");

    Ok(Itinerary::from_ordered(trip_id, built))
}

fn order_timeline(
    stint: &StintId,
    items: &[RawTimelineItem],
) -> Result<Vec<TimelineEntry>, ItineraryError> {
    let mut entries = items
        .iter()
        .map(convert_entry)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ItineraryError::InvalidEntry {
            stint: stint.clone(),
            source,
        })?;

    entries.sort_by_key(TimelineEntry::sequence);

    if let Some(pair) = entries.windows(2).find(|w| w[0].sequence() == w[1].sequence()) {
        warn!(stint = %stint, sequence = pair[0].sequence(), "duplicate timeline sequence number");
        return Err(ItineraryError::DuplicateEntrySequence {
            stint: stint.clone(),
            sequence: pair[0].sequence(),
        });
    }

    if let Some(last) = entries.last().filter(|e| e.sequence() > MAX_SEQUENCE) {
        warn!(stint = %stint, sequence = last.sequence(), "timeline sequence number out of range");
        return Err(ItineraryError::EntrySequenceExhausted {
            stint: stint.clone(),
            sequence: last.sequence(),
        });
    }

    Ok(entries)
}

/// Fetches a trip's records and assembles them into an itinerary.
pub struct ItineraryAssembler<'a, P: TimelineProvider> {
    provider: &'a P,
}

impl<'a, P: TimelineProvider + Sync> ItineraryAssembler<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Load the itinerary for `trip_id`.
    ///
    /// Fetch failures are surfaced unchanged as [`ItineraryError::Fetch`].
    pub async fn load(&self, trip_id: &TripId) -> Result<Itinerary, ItineraryError> {
        let response = self.provider.fetch_timeline(trip_id).await?;
        assemble_itinerary(trip_id.clone(), response.stints)
    }
}
