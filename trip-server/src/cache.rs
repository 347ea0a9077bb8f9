//! Caching layer for geocode lookups.
//!
//! The same waypoints are typed again and again (home, the campsite, the
//! next town), and geocoding is both slow and metered. Results are cached
//! per normalised address: trimmed and lowercased, so "Portland, OR " and
//! "portland, or" share an entry.
//!
//! Both hits and misses (`Ok(None)`) are cached. Errors never are; the next
//! request for that address goes back to the geocoder.
//!
//! Places are cached exactly as the geocoder returned them. A place with no
//! label stays unlabelled, so each caller's own text is used as its marker
//! label rather than whichever spelling filled the entry.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::maps::MapsError;
use crate::route::{Geocoder, Place};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Geocoder with caching.
///
/// Wraps any [`Geocoder`] and is itself one, so it can be handed to the
/// route pipeline in place of the raw client.
pub struct CachedGeocoder<G> {
    inner: G,
    places: MokaCache<String, Option<Place>>,
}

impl<G> CachedGeocoder<G> {
    /// Create a new cached geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, places }
    }

    /// Access the underlying geocoder for lookups that bypass the cache.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.places.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.places.invalidate_all();
    }
}

fn cache_key(address: &str) -> String {
    address.trim().to_lowercase()
}

impl<G: Geocoder + Sync> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, address: &str) -> Result<Option<Place>, MapsError> {
        let key = cache_key(address);

        if let Some(cached) = self.places.get(&key).await {
            debug!(address = %key, found = cached.is_some(), "geocode cache hit");
            return Ok(cached);
        }

        let place = self.inner.geocode(address).await?;
        self.places.insert(key, place.clone()).await;

        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Waypoint;
    use crate::route::WaypointResolver;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Geocoder that counts calls and fails for addresses in `failing`.
    struct CountingGeocoder {
        places: HashMap<String, Place>,
        failing: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl CountingGeocoder {
        fn new() -> Self {
            let mut places = HashMap::new();
            places.insert(
                "portland, or".to_string(),
                Place {
                    label: Some("Portland, OR, USA".into()),
                    latitude: 45.5152,
                    longitude: -122.6784,
                },
            );
            places.insert(
                "bend, or".to_string(),
                Place {
                    label: None,
                    latitude: 44.0582,
                    longitude: -121.3153,
                },
            );
            Self {
                places,
                failing: vec!["flaky".to_string()],
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, address: &str) -> Result<Option<Place>, MapsError> {
            self.calls.lock().unwrap().push(address.to_string());
            let key = address.trim().to_lowercase();
            if self.failing.contains(&key) {
                return Err(MapsError::RateLimited);
            }
            Ok(self.places.get(&key).cloned())
        }
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 10_000);
    }

    #[test]
    fn key_is_normalised() {
        assert_eq!(cache_key("  Portland, OR "), "portland, or");
        assert_eq!(cache_key("PORTLAND, OR"), cache_key("portland, or"));
    }

    #[tokio::test]
    async fn hits_are_served_from_cache() {
        let geocoder = CachedGeocoder::new(CountingGeocoder::new(), &CacheConfig::default());

        let first = geocoder.geocode("Portland, OR").await.unwrap();
        let second = geocoder.geocode(" portland, or ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.unwrap().label.as_deref(), Some("Portland, OR, USA"));
        assert_eq!(geocoder.inner().call_count(), 1);
    }

    #[tokio::test]
    async fn unlabelled_hits_take_each_callers_text() {
        let geocoder = CachedGeocoder::new(CountingGeocoder::new(), &CacheConfig::default());
        geocoder.geocode("bend, or").await.unwrap();

        let resolution = WaypointResolver::new(&geocoder)
            .resolve(&[
                Waypoint::new("w0", "Bend, OR"),
                Waypoint::new("w1", "BEND, or "),
            ])
            .await;

        let labels: Vec<&str> = resolution.markers.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Bend, OR", "BEND, or "]);
        assert_eq!(geocoder.inner().call_count(), 1);
    }

    #[tokio::test]
    async fn misses_are_cached() {
        let geocoder = CachedGeocoder::new(CountingGeocoder::new(), &CacheConfig::default());

        assert_eq!(geocoder.geocode("Atlantis").await.unwrap(), None);
        assert_eq!(geocoder.geocode("atlantis").await.unwrap(), None);
        assert_eq!(geocoder.inner().call_count(), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let geocoder = CachedGeocoder::new(CountingGeocoder::new(), &CacheConfig::default());

        assert!(matches!(
            geocoder.geocode("flaky").await,
            Err(MapsError::RateLimited)
        ));
        assert!(geocoder.geocode("flaky").await.is_err());
        assert_eq!(geocoder.inner().call_count(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let geocoder = CachedGeocoder::new(CountingGeocoder::new(), &CacheConfig::default());

        geocoder.geocode("Portland, OR").await.unwrap();
        geocoder.invalidate_cache();
        geocoder.geocode("Portland, OR").await.unwrap();

        assert_eq!(geocoder.inner().call_count(), 2);
    }
}
