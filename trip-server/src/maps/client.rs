//! Maps web-service HTTP client.
//!
//! Provides async methods for the directions and geocoding endpoints.
//! Handles authentication, concurrency limiting, and status mapping.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::route::{DirectionsProvider, DirectionsQuery, Geocoder, Place};

use super::error::MapsError;
use super::types::{DirectionsResponse, GeocodeResponse};

/// Default base URL for the maps web services.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Statuses that mean the request itself succeeded.
const DIRECTIONS_OK: &[&str] = &["OK", "ZERO_RESULTS", "NOT_FOUND"];
const GEOCODE_OK: &[&str] = &["OK", "ZERO_RESULTS"];

/// Configuration for the maps client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Maps API client.
///
/// Uses a semaphore to limit concurrent requests; waypoint resolution fans
/// out one geocode per location and would otherwise burst the quota.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl MapsClient {
    /// Create a new maps client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Look up driving directions.
    ///
    /// `ZERO_RESULTS` and `NOT_FOUND` come back as a response with no
    /// routes rather than an error.
    pub async fn get_directions(
        &self,
        query: &DirectionsQuery,
    ) -> Result<DirectionsResponse, MapsError> {
        let params = directions_params(query, &self.api_key);
        let mut response: DirectionsResponse = self.get_json("directions/json", &params).await?;

        check_status(
            &response.status,
            response.error_message.as_deref(),
            DIRECTIONS_OK,
        )?;
        if matches!(response.status.as_str(), "ZERO_RESULTS" | "NOT_FOUND") {
            response.routes.clear();
        }

        debug!(
            origin = %query.origin,
            destination = %query.destination,
            waypoints = query.waypoints.len(),
            routes = response.routes.len(),
            "directions lookup complete"
        );

        Ok(response)
    }

    /// Geocode a free-text address.
    ///
    /// Returns `Ok(None)` when nothing matches.
    pub async fn geocode_address(&self, address: &str) -> Result<Option<Place>, MapsError> {
        let params = [
            ("address", address.to_string()),
            ("key", self.api_key.clone()),
        ];
        let response: GeocodeResponse = self.get_json("geocode/json", &params).await?;

        check_status(
            &response.status,
            response.error_message.as_deref(),
            GEOCODE_OK,
        )?;

        let place = first_place(response);
        debug!(address, found = place.is_some(), "geocode lookup complete");
        Ok(place)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, MapsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MapsError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self.http.get(&url).query(params).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MapsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MapsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MapsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl Geocoder for MapsClient {
    async fn geocode(&self, address: &str) -> Result<Option<Place>, MapsError> {
        self.geocode_address(address).await
    }
}

impl DirectionsProvider for MapsClient {
    async fn directions(&self, query: &DirectionsQuery) -> Result<DirectionsResponse, MapsError> {
        self.get_directions(query).await
    }
}

/// Query parameters for a directions request.
///
/// Waypoints are pipe-separated in request order.
fn directions_params(query: &DirectionsQuery, api_key: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("origin", query.origin.clone()),
        ("destination", query.destination.clone()),
    ];
    if !query.waypoints.is_empty() {
        params.push(("waypoints", query.waypoints.join("|")));
    }
    params.push(("key", api_key.to_string()));
    params
}

/// Map a response `status` field onto an error, if it is not one of `accepted`.
///
/// A missing status is treated as success.
fn check_status(status: &str, message: Option<&str>, accepted: &[&str]) -> Result<(), MapsError> {
    if status.is_empty() || accepted.contains(&status) {
        return Ok(());
    }

    match status {
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(MapsError::RateLimited),
        "REQUEST_DENIED" => Err(MapsError::Unauthorized),
        other => Err(MapsError::Status {
            status: other.to_string(),
            message: message.map(str::to_string),
        }),
    }
}

/// Take the best geocode match, labelled by its formatted address.
fn first_place(response: GeocodeResponse) -> Option<Place> {
    let result = response.results.into_iter().next()?;
    Some(Place {
        label: result.formatted_address,
        latitude: result.geometry.location.lat,
        longitude: result.geometry.location.lng,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = MapsConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(2)
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = MapsConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let client = MapsClient::new(MapsConfig::new("test-key").with_base_url("http://x/"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "http://x");
    }

    #[test]
    fn directions_params_keep_waypoint_order() {
        let query = DirectionsQuery {
            origin: "Portland, OR".into(),
            destination: "Denver, CO".into(),
            waypoints: vec!["Boise, ID".into(), "Salt Lake City, UT".into()],
        };

        let params = directions_params(&query, "k");
        assert_eq!(
            params,
            vec![
                ("origin", "Portland, OR".to_string()),
                ("destination", "Denver, CO".to_string()),
                ("waypoints", "Boise, ID|Salt Lake City, UT".to_string()),
                ("key", "k".to_string()),
            ]
        );
    }

    #[test]
    fn directions_params_omit_empty_waypoints() {
        let query = DirectionsQuery {
            origin: "A".into(),
            destination: "B".into(),
            waypoints: vec![],
        };
        let params = directions_params(&query, "k");
        assert!(params.iter().all(|(name, _)| *name != "waypoints"));
    }

    #[test]
    fn status_mapping() {
        assert!(check_status("OK", None, DIRECTIONS_OK).is_ok());
        assert!(check_status("ZERO_RESULTS", None, DIRECTIONS_OK).is_ok());
        assert!(check_status("", None, GEOCODE_OK).is_ok());
        assert!(matches!(
            check_status("OVER_QUERY_LIMIT", None, GEOCODE_OK),
            Err(MapsError::RateLimited)
        ));
        assert!(matches!(
            check_status("REQUEST_DENIED", None, GEOCODE_OK),
            Err(MapsError::Unauthorized)
        ));
        assert!(matches!(
            check_status("NOT_FOUND", Some("bad"), GEOCODE_OK),
            Err(MapsError::Status { status, message }) if status == "NOT_FOUND" && message.as_deref() == Some("bad")
        ));
    }

    #[test]
    fn first_place_prefers_formatted_address() {
        let response: GeocodeResponse = serde_json::from_str(
            r#"{"status":"OK","results":[
                {"formatted_address":"Reno, NV, USA","geometry":{"location":{"lat":39.5,"lng":-119.8}}},
                {"formatted_address":"Reno, TX, USA","geometry":{"location":{"lat":33.6,"lng":-95.4}}}
            ]}"#,
        )
        .unwrap();

        let place = first_place(response).unwrap();
        assert_eq!(place.label.as_deref(), Some("Reno, NV, USA"));
        assert_eq!(place.latitude, 39.5);
    }

    #[test]
    fn first_place_without_formatted_address_has_no_label() {
        let response: GeocodeResponse = serde_json::from_str(
            r#"{"status":"OK","results":[{"geometry":{"location":{"lat":1.0,"lng":2.0}}}]}"#,
        )
        .unwrap();
        assert_eq!(first_place(response).unwrap().label, None);
    }

    #[test]
    fn first_place_none_on_empty_results() {
        let response = GeocodeResponse::default();
        assert!(first_place(response).is_none());
    }

    // Integration tests would need a real API key and network access.
}
