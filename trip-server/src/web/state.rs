//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedGeocoder};
use crate::maps::MapsClient;
use crate::route::CancelToken;
use crate::trips::TripClient;

/// Shared application state.
///
/// Contains all the clients needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Maps client used for directions lookups
    pub maps: Arc<MapsClient>,

    /// Cached geocoder for waypoint markers
    pub geocoder: Arc<CachedGeocoder<MapsClient>>,

    /// Trip API client
    pub trips: Arc<TripClient>,

    /// Fires on server shutdown; route requests still in flight are abandoned
    pub shutdown: CancelToken,
}

impl AppState {
    /// Create a new app state.
    ///
    /// The geocoder shares the maps client's connection pool and
    /// concurrency limit.
    pub fn new(
        maps: MapsClient,
        trips: TripClient,
        cache_config: &CacheConfig,
        shutdown: CancelToken,
    ) -> Self {
        let geocoder = CachedGeocoder::new(maps.clone(), cache_config);
        Self {
            maps: Arc::new(maps),
            geocoder: Arc::new(geocoder),
            trips: Arc::new(trips),
            shutdown,
        }
    }
}
