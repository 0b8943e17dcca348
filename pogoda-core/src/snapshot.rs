//! The parsed, queryable view over one forecast response.
//!
//! Every accessor reads straight from the wrapped [`RawResponse`] and
//! formats the value for display. A key that the response does not
//! carry (because the field was not requested, or the payload is
//! incomplete) surfaces as [`WeatherError::NoData`] at read time.

use crate::codes;
use crate::error::WeatherError;
use crate::model::{ForecastRow, RawResponse};

/// Factor for converting hPa to millimetres of mercury.
const HPA_TO_MM_HG: f64 = 0.7501;

#[derive(Debug, Clone)]
pub struct ForecastSnapshot {
    raw: RawResponse,
}

impl ForecastSnapshot {
    pub fn new(raw: RawResponse) -> Self {
        Self { raw }
    }

    /// The current observation moment as ("25 Ноя", "14:00").
    pub fn current_timestamp(&self) -> Result<(String, String), WeatherError> {
        let time = self
            .raw
            .current()?
            .time
            .as_deref()
            .ok_or_else(|| WeatherError::no_data("current.time"))?;

        let (date, clock) = time
            .split_once('T')
            .ok_or_else(|| WeatherError::no_data("current.time"))?;

        Ok((format_day(date)?, clock.to_string()))
    }

    pub fn temperature(&self) -> Result<String, WeatherError> {
        let t = self
            .raw
            .current()?
            .temperature_2m
            .ok_or_else(|| WeatherError::no_data("current.temperature_2m"))?;

        Ok(format!("{}°C", t.round() as i64))
    }

    pub fn apparent_temperature(&self) -> Result<String, WeatherError> {
        let t = self
            .raw
            .current()?
            .apparent_temperature
            .ok_or_else(|| WeatherError::no_data("current.apparent_temperature"))?;

        Ok(format!("{}°C", t.round() as i64))
    }

    pub fn relative_humidity(&self) -> Result<String, WeatherError> {
        let humidity = self
            .raw
            .current()?
            .relative_humidity_2m
            .ok_or_else(|| WeatherError::no_data("current.relative_humidity_2m"))?;

        Ok(format!("{humidity}%"))
    }

    pub fn precipitation(&self) -> Result<String, WeatherError> {
        let precipitation = self
            .raw
            .current()?
            .precipitation
            .ok_or_else(|| WeatherError::no_data("current.precipitation"))?;

        Ok(format!("{} мм", precipitation.round() as i64))
    }

    /// Current conditions as text, via the weather-code table.
    pub fn description(&self) -> Result<String, WeatherError> {
        let code = self
            .raw
            .current()?
            .weather_code
            .ok_or_else(|| WeatherError::no_data("current.weather_code"))?;

        let description = codes::weather_description(code.round() as i64)?;
        Ok(description.to_string())
    }

    /// Sea-level pressure converted from hPa to mm Hg.
    pub fn pressure(&self) -> Result<String, WeatherError> {
        let hpa = self
            .raw
            .current()?
            .pressure_msl
            .ok_or_else(|| WeatherError::no_data("current.pressure_msl"))?;

        let mm_hg = (hpa * HPA_TO_MM_HG).round() as i64;
        Ok(format!("{mm_hg} мм рт. ст."))
    }

    pub fn wind_speed(&self) -> Result<String, WeatherError> {
        let speed = self
            .raw
            .current()?
            .wind_speed_10m
            .ok_or_else(|| WeatherError::no_data("current.wind_speed_10m"))?;

        Ok(format!("{speed} м/с"))
    }

    /// Map the 0–360° wind bearing onto one of 8 compass points.
    ///
    /// Sector boundaries alternate between closed and open on purpose:
    /// this reproduces the reference behavior bit-for-bit at the edges
    /// (22.5° is still north, 67.5° is already east).
    pub fn wind_direction(&self) -> Result<String, WeatherError> {
        let bearing = self
            .raw
            .current()?
            .wind_direction_10m
            .ok_or_else(|| WeatherError::no_data("current.wind_direction_10m"))?;

        let point = if bearing >= 337.5 || bearing <= 22.5 {
            "С"
        } else if bearing < 67.5 {
            "СВ"
        } else if bearing <= 112.5 {
            "В"
        } else if bearing < 157.5 {
            "ЮВ"
        } else if bearing <= 202.5 {
            "Ю"
        } else if bearing < 247.5 {
            "ЮЗ"
        } else if bearing <= 292.5 {
            "З"
        } else {
            "СЗ"
        };

        Ok(point.to_string())
    }

    /// The upcoming days, one formatted row each.
    ///
    /// The response always includes today as its first daily entry;
    /// that row is dropped so only the following days are returned.
    pub fn forecast(&self) -> Result<Vec<ForecastRow>, WeatherError> {
        let daily = self.raw.daily()?;

        let mut rows = Vec::with_capacity(daily.time.len());
        for (((date, min), max), code) in daily
            .time
            .iter()
            .zip(&daily.temperature_2m_min)
            .zip(&daily.temperature_2m_max)
            .zip(&daily.weather_code)
        {
            rows.push(ForecastRow {
                day: format_day(date)?,
                min_temp: (min.round() as i64).to_string(),
                max_temp: (max.round() as i64).to_string(),
                description: codes::weather_description(*code)?.to_string(),
            });
        }

        Ok(rows.into_iter().skip(1).collect())
    }

    /// The coordinates echoed back by the service. These may differ
    /// slightly from the requested point due to grid snapping.
    pub fn coordinates(&self) -> Result<(String, String), WeatherError> {
        let latitude = self
            .raw
            .latitude
            .ok_or_else(|| WeatherError::no_data("latitude"))?;
        let longitude = self
            .raw
            .longitude
            .ok_or_else(|| WeatherError::no_data("longitude"))?;

        Ok((latitude.to_string(), longitude.to_string()))
    }
}

/// Format an ISO date ("2024-11-25") as "25 Ноя".
fn format_day(date: &str) -> Result<String, WeatherError> {
    let mut parts = date.splitn(3, '-');
    let _year = parts.next();
    let month = parts.next().ok_or_else(|| WeatherError::no_data("date"))?;
    let day = parts.next().ok_or_else(|| WeatherError::no_data("date"))?;

    Ok(format!("{day} {}", codes::month_label(month)?))
}
