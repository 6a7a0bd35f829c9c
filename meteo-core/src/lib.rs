//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Typo correction of city names and the weather-code table
//! - The geocode → forecast lookup pipeline over an abstract [`WeatherApi`]
//! - Search history over an abstract [`KeyValueStore`]
//! - Rendering of lookup results into display fields
//!
//! It is used by `meteo-cli`, but can also be reused by other front ends.

pub mod app;
pub mod config;
pub mod corrector;
pub mod distance;
pub mod error;
pub mod history;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod store;
pub mod weather_code;

pub use app::{App, AppState, SearchOutcome};
pub use config::Config;
pub use corrector::CityNameCorrector;
pub use distance::distance;
pub use error::LookupError;
pub use history::SearchHistoryStore;
pub use model::{City, CurrentWeather, DailyForecastEntry, Forecast, WeatherResult};
pub use pipeline::{Lookup, WeatherPipeline};
pub use provider::{OpenMeteoProvider, WeatherApi, provider_from_config};
pub use render::{ForecastCard, WeatherView, render};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use weather_code::{WeatherLabel, describe};
