//! HTTP client for the Open-Meteo forecast endpoint.

use reqwest::Client;
use std::time::Duration;

use crate::error::WeatherError;
use crate::model::{Coordinates, CurrentField, RawResponse};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Fixed per-day series requested on every lookup.
const DAILY_FIELDS: &[&str] = &["weather_code", "temperature_2m_max", "temperature_2m_min"];

const FORECAST_DAYS: u32 = 4;

/// Composes and issues one forecast request for a resolved location.
///
/// The `current` field selection is held as state, but the query is
/// rebuilt from scratch on every [`ForecastClient::fetch`]: replacing
/// the selection and fetching again never duplicates parameters.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
    coordinates: Coordinates,
    current_fields: Vec<CurrentField>,
}

impl ForecastClient {
    pub fn new(coordinates: Coordinates) -> Result<Self, WeatherError> {
        Self::with_base_url(coordinates, FORECAST_URL.to_string())
    }

    /// Same as [`ForecastClient::new`] but against a caller-supplied
    /// endpoint. Used by tests to point at a mock server.
    pub fn with_base_url(
        coordinates: Coordinates,
        base_url: String,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| WeatherError::ServiceUnavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            coordinates,
            current_fields: Vec::new(),
        })
    }

    /// Replace the selected optional current-condition fields.
    ///
    /// Calling this repeatedly is idempotent: the previous selection is
    /// discarded, never appended to.
    pub fn set_current_fields(&mut self, fields: &[CurrentField]) {
        self.current_fields = fields.to_vec();
    }

    pub fn current_fields(&self) -> &[CurrentField] {
        &self.current_fields
    }

    /// The full query for this request, rebuilt from the current state.
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("latitude", self.coordinates.latitude.to_string()),
            ("longitude", self.coordinates.longitude.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
            ("wind_speed_unit", "ms".to_string()),
            ("daily", DAILY_FIELDS.join(",")),
        ];

        if !self.current_fields.is_empty() {
            let current = self
                .current_fields
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(",");
            query.push(("current", current));
        }

        query
    }

    /// Issue the request and parse the JSON body.
    pub async fn fetch(&self) -> Result<RawResponse, WeatherError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&self.query())
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
                "forecast status {status}"
            )));
        }

        let raw: RawResponse =
            serde_json::from_str(&body).map_err(|_| WeatherError::no_data("forecast body"))?;

        Ok(raw)
    }
}
