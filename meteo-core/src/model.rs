use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub condition_code: i32,
}

/// One day of the daily forecast. Dates and times are ISO strings in the
/// location's own timezone, as returned upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: String,
    pub condition_code: i32,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub sunrise: String,
    pub sunset: String,
}

/// Output of the forecast stage, before it is paired with the city.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub current: CurrentWeather,
    /// Index 0 is today.
    pub daily: Vec<DailyForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: City,
    pub current: CurrentWeather,
    pub daily: Vec<DailyForecastEntry>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherResult {
    pub fn new(city: City, forecast: Forecast, fetched_at: DateTime<Utc>) -> Self {
        Self { city, current: forecast.current, daily: forecast.daily, fetched_at }
    }

    pub fn today(&self) -> Option<&DailyForecastEntry> {
        self.daily.first()
    }
}
