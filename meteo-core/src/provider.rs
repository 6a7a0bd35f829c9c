use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::LookupError,
    model::{City, Forecast},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// The two upstream calls a lookup needs. Implemented over HTTP by
/// [`OpenMeteoProvider`]; tests substitute their own.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// Resolve a place name. An empty vec means nothing matched.
    async fn geocode(&self, name: &str) -> Result<Vec<City>, LookupError>;

    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, LookupError>;
}

#[async_trait]
impl<T: WeatherApi + ?Sized> WeatherApi for Box<T> {
    async fn geocode(&self, name: &str) -> Result<Vec<City>, LookupError> {
        (**self).geocode(name).await
    }

    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, LookupError> {
        (**self).forecast(latitude, longitude).await
    }
}

/// Construct the HTTP-backed provider from config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherApi> {
    Box::new(OpenMeteoProvider::from_config(config))
}
