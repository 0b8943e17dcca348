use serde::Deserialize;
use std::convert::TryFrom;

use crate::error::WeatherError;

/// A resolved (latitude, longitude) pair. Produced once per geocoding
/// lookup and immutable for the lifetime of the request that uses it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One formatted row of the multi-day forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRow {
    /// Day label formatted as "25 Ноя".
    pub day: String,
    pub min_temp: String,
    pub max_temp: String,
    pub description: String,
}

/// The optional current-condition fields a caller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrentField {
    Temperature,
    ApparentTemperature,
    WeatherCode,
    RelativeHumidity,
    Precipitation,
    Pressure,
    WindSpeed,
    WindDirection,
}

impl CurrentField {
    /// The wire name of the field in the forecast API.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentField::Temperature => "temperature_2m",
            CurrentField::ApparentTemperature => "apparent_temperature",
            CurrentField::WeatherCode => "weather_code",
            CurrentField::RelativeHumidity => "relative_humidity_2m",
            CurrentField::Precipitation => "precipitation",
            CurrentField::Pressure => "pressure_msl",
            CurrentField::WindSpeed => "wind_speed_10m",
            CurrentField::WindDirection => "wind_direction_10m",
        }
    }

    pub const fn all() -> &'static [CurrentField] {
        &[
            CurrentField::Temperature,
            CurrentField::ApparentTemperature,
            CurrentField::WeatherCode,
            CurrentField::RelativeHumidity,
            CurrentField::Precipitation,
            CurrentField::Pressure,
            CurrentField::WindSpeed,
            CurrentField::WindDirection,
        ]
    }

    /// The fields every lookup requests regardless of the caller's
    /// selection: enough to render the headline conditions.
    pub const fn base() -> &'static [CurrentField] {
        &[
            CurrentField::Temperature,
            CurrentField::ApparentTemperature,
            CurrentField::WeatherCode,
        ]
    }
}

impl std::fmt::Display for CurrentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CurrentField {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "temperature_2m" => Ok(CurrentField::Temperature),
            "apparent_temperature" => Ok(CurrentField::ApparentTemperature),
            "weather_code" => Ok(CurrentField::WeatherCode),
            "relative_humidity_2m" => Ok(CurrentField::RelativeHumidity),
            "precipitation" => Ok(CurrentField::Precipitation),
            "pressure_msl" => Ok(CurrentField::Pressure),
            "wind_speed_10m" => Ok(CurrentField::WindSpeed),
            "wind_direction_10m" => Ok(CurrentField::WindDirection),
            _ => Err(anyhow::anyhow!(
                "Unknown current-condition field '{value}'. Supported fields: {}.",
                CurrentField::all()
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// One raw forecast response as the service returns it.
///
/// Every leaf is optional: which keys are present depends on the
/// `current` fields the caller selected, and a missing key only
/// becomes an error when the corresponding snapshot accessor is read.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResponse {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub current: Option<CurrentConditions>,
    pub daily: Option<DailySeries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    /// ISO-8601 local date-time, e.g. "2024-11-25T14:00".
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub weather_code: Option<f64>,
    pub relative_humidity_2m: Option<i64>,
    pub precipitation: Option<f64>,
    pub pressure_msl: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
}

/// Parallel per-day sequences, aligned by index, day 0 is today.
#[derive(Debug, Clone, Deserialize)]
pub struct DailySeries {
    /// ISO-8601 dates, e.g. "2024-11-25".
    pub time: Vec<String>,
    pub temperature_2m_min: Vec<f64>,
    pub temperature_2m_max: Vec<f64>,
    pub weather_code: Vec<i64>,
}

impl RawResponse {
    pub(crate) fn current(&self) -> Result<&CurrentConditions, WeatherError> {
        self.current.as_ref().ok_or_else(|| WeatherError::no_data("current"))
    }

    pub(crate) fn daily(&self) -> Result<&DailySeries, WeatherError> {
        self.daily.as_ref().ok_or_else(|| WeatherError::no_data("daily"))
    }
}
