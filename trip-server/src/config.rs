//! Server configuration loaded from environment variables.
//!
//! | Variable                 | Required | Default          |
//! |--------------------------|----------|------------------|
//! | `MAPS_API_KEY`           | yes      |                  |
//! | `MAPS_BASE_URL`          | no       | Google Maps API  |
//! | `TRIPS_API_URL`          | yes      |                  |
//! | `TRIPS_API_TOKEN`        | no       | none             |
//! | `BIND_ADDR`              | no       | `127.0.0.1:3000` |
//! | `GEOCODE_CACHE_TTL_SECS` | no       | 3600             |
//! | `GEOCODE_CACHE_CAPACITY` | no       | 10000            |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::maps::MapsConfig;
use crate::trips::TripClientConfig;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Error loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub maps: MapsConfig,
    pub trips: TripClientConfig,
    pub geocode_cache: CacheConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if set. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("MAPS_API_KEY").ok_or(ConfigError::Missing("MAPS_API_KEY"))?;
        let mut maps = MapsConfig::new(api_key);
        if let Some(url) = get("MAPS_BASE_URL") {
            maps = maps.with_base_url(url);
        }

        let trips_url = get("TRIPS_API_URL").ok_or(ConfigError::Missing("TRIPS_API_URL"))?;
        let mut trips = TripClientConfig::new(trips_url);
        if let Some(token) = get("TRIPS_API_TOKEN") {
            trips = trips.with_token(token);
        }

        let bind_addr = parse_or(
            "BIND_ADDR",
            get("BIND_ADDR"),
            SocketAddr::from(DEFAULT_BIND_ADDR),
        )?;

        let defaults = CacheConfig::default();
        let ttl_secs = parse_or(
            "GEOCODE_CACHE_TTL_SECS",
            get("GEOCODE_CACHE_TTL_SECS"),
            defaults.ttl.as_secs(),
        )?;
        let max_capacity = parse_or(
            "GEOCODE_CACHE_CAPACITY",
            get("GEOCODE_CACHE_CAPACITY"),
            defaults.max_capacity,
        )?;

        Ok(Self {
            bind_addr,
            maps,
            trips,
            geocode_cache: CacheConfig {
                ttl: Duration::from_secs(ttl_secs),
                max_capacity,
            },
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
