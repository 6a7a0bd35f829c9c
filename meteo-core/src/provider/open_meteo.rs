use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::{
    Config,
    error::LookupError,
    model::{City, CurrentWeather, DailyForecastEntry, Forecast},
};

use super::WeatherApi;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode,sunrise,sunset";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
}

impl OpenMeteoProvider {
    pub fn new(
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.geocoding_url, &config.forecast_url, &config.language)
    }
}

#[derive(Debug, Serialize)]
struct GeocodeQuery<'a> {
    name: &'a str,
    count: u8,
    language: &'a str,
}

#[derive(Debug, Serialize)]
struct ForecastQuery<'a> {
    latitude: f64,
    longitude: f64,
    daily: &'a str,
    current_weather: bool,
    timezone: &'a str,
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResponse {
    #[serde(default)]
    results: Option<Vec<OmPlace>>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    name: String,
    #[serde(default)]
    country: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    weathercode: Vec<i32>,
    temperature_2m_min: Vec<f64>,
    temperature_2m_max: Vec<f64>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: OmCurrent,
    daily: OmDaily,
}

#[async_trait]
impl WeatherApi for OpenMeteoProvider {
    async fn geocode(&self, name: &str) -> Result<Vec<City>, LookupError> {
        tracing::debug!(name, language = %self.language, "geocoding request");

        let query = GeocodeQuery { name, count: 1, language: &self.language };
        let body = send(self.http.get(&self.geocoding_url).query(&query), "geocoding").await?;

        parse_geocode(&body)
    }

    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, LookupError> {
        tracing::debug!(latitude, longitude, "forecast request");

        let query = ForecastQuery {
            latitude,
            longitude,
            daily: DAILY_FIELDS,
            current_weather: true,
            timezone: "auto",
        };
        let body = send(self.http.get(&self.forecast_url).query(&query), "forecast").await?;

        parse_forecast(&body)
    }
}

async fn send(request: RequestBuilder, what: &str) -> Result<String, LookupError> {
    let res = request
        .send()
        .await
        .map_err(|e| LookupError::Network(format!("{what} request failed: {e}")))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| LookupError::Network(format!("failed to read {what} response body: {e}")))?;

    if !status.is_success() {
        return Err(LookupError::Network(format!(
            "{what} request failed with status {status}: {}",
            truncate_body(&body),
        )));
    }

    Ok(body)
}

fn parse_geocode(body: &str) -> Result<Vec<City>, LookupError> {
    let parsed: OmGeocodeResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Parse(format!("geocoding payload: {e}")))?;

    Ok(parsed
        .results
        .unwrap_or_default()
        .into_iter()
        .map(|p| City {
            name: p.name,
            country: p.country,
            latitude: p.latitude,
            longitude: p.longitude,
        })
        .collect())
}

fn parse_forecast(body: &str) -> Result<Forecast, LookupError> {
    let parsed: OmForecastResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Parse(format!("forecast payload: {e}")))?;

    let OmDaily { time, weathercode, temperature_2m_min, temperature_2m_max, sunrise, sunset } =
        parsed.daily;

    let days = time.len();
    let lengths = [
        weathercode.len(),
        temperature_2m_min.len(),
        temperature_2m_max.len(),
        sunrise.len(),
        sunset.len(),
    ];
    if lengths.iter().any(|&len| len != days) {
        return Err(LookupError::Parse(format!(
            "forecast payload: daily arrays have mismatched lengths ({days} days, {lengths:?})"
        )));
    }

    let daily = time
        .into_iter()
        .zip(weathercode)
        .zip(temperature_2m_min.into_iter().zip(temperature_2m_max))
        .zip(sunrise.into_iter().zip(sunset))
        .map(|(((date, condition_code), (min_temp_c, max_temp_c)), (sunrise, sunset))| {
            DailyForecastEntry { date, condition_code, min_temp_c, max_temp_c, sunrise, sunset }
        })
        .collect();

    Ok(Forecast {
        current: CurrentWeather {
            temperature_c: parsed.current_weather.temperature,
            wind_speed_kmh: parsed.current_weather.windspeed,
            condition_code: parsed.current_weather.weathercode,
        },
        daily,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
