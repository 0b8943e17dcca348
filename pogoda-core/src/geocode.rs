//! Forward geocoding: resolve a free-text city name to coordinates.
//!
//! Uses the Nominatim (OpenStreetMap) search endpoint. Nominatim asks
//! clients to identify themselves, so each call sends a User-Agent
//! drawn at random from a pool of common browser identities; any
//! opaque identity string is acceptable to the service.

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use std::time::Duration;

use crate::error::WeatherError;
use crate::model::Coordinates;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const REQUEST_TIMEOUT_SECS: u64 = 10;

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:131.0) Gecko/20100101 Firefox/131.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:131.0) Gecko/20100101 Firefox/131.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36",
];

/// Turns a city name into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, city: &str) -> Result<Coordinates, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(NOMINATIM_URL.to_string())
    }

    /// Same as [`NominatimGeocoder::new`] but against a caller-supplied
    /// endpoint. Used by tests to point at a mock server.
    pub fn with_base_url(base_url: String) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| WeatherError::ServiceUnavailable(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    fn random_user_agent() -> &'static str {
        USER_AGENTS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(USER_AGENTS[0])
    }
}

/// One match in a Nominatim search response. Coordinates come back as
/// decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, city: &str) -> Result<Coordinates, WeatherError> {
        let res = self
            .http
            .get(&self.base_url)
            .header(reqwest::header::USER_AGENT, Self::random_user_agent())
            .query(&[("q", city), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| WeatherError::ServiceUnavailable(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::ServiceUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(WeatherError::ServiceUnavailable(format!(
                "geocoding status {status}"
            )));
        }

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|_| WeatherError::no_data("geocoding body"))?;

        let place = places.into_iter().next().ok_or(WeatherError::CityNotFound)?;

        let latitude: f64 = place
            .lat
            .parse()
            .map_err(|_| WeatherError::no_data("lat"))?;
        let longitude: f64 = place
            .lon
            .parse()
            .map_err(|_| WeatherError::no_data("lon"))?;

        Ok(Coordinates { latitude, longitude })
    }
}
