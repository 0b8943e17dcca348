//! Core library for the `pogoda` weather app.
//!
//! This crate defines:
//! - Geocoding of free-text city names to coordinates
//! - The forecast request client and the parsed snapshot over one response
//! - Interpretation tables (weather codes, month labels)
//! - The durable preference store (favourite cities, last-used city,
//!   favourite-weather rule)
//!
//! It is used by `pogoda-cli`, but can also be reused by other binaries
//! or front-ends.

pub mod client;
pub mod codes;
pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod snapshot;
pub mod store;

pub use client::ForecastClient;
pub use config::Config;
pub use error::WeatherError;
pub use geocode::{Geocoder, NominatimGeocoder};
pub use model::{Coordinates, CurrentField, ForecastRow, RawResponse};
pub use snapshot::ForecastSnapshot;
pub use store::{FavouriteWeatherRule, PreferenceStore};
