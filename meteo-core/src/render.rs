//! Turns a [`WeatherResult`] into ready-to-print display fields.

use serde::Serialize;
use std::fmt;

use crate::{model::WeatherResult, weather_code::describe};

/// Shown where a value is not available.
pub const PLACEHOLDER: &str = "—";

/// Number of forecast cards shown.
pub const FORECAST_DAYS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    pub date: String,
    pub icon: String,
    pub label: String,
    pub temperature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub header: String,
    pub temperature: String,
    pub condition: String,
    pub sunrise: String,
    pub sunset: String,
    pub wind: String,
    /// Open-Meteo's current_weather block carries no humidity.
    pub humidity: String,
    pub forecast: Vec<ForecastCard>,
}

pub fn render(result: &WeatherResult) -> WeatherView {
    let current = describe(result.current.condition_code);
    let today = result.today();

    let forecast = result
        .daily
        .iter()
        .take(FORECAST_DAYS)
        .map(|day| {
            let label = describe(day.condition_code);
            ForecastCard {
                date: day.date.clone(),
                icon: label.icon.to_string(),
                label: label.text.to_string(),
                temperature: format!(
                    "{}° / {}°",
                    round_half_up(day.min_temp_c),
                    round_half_up(day.max_temp_c)
                ),
            }
        })
        .collect();

    WeatherView {
        header: format!("{}, {}", result.city.name, result.city.country),
        temperature: format!("{}°C", format_number(result.current.temperature_c)),
        condition: format!("{} {}", current.icon, current.text),
        sunrise: today.map_or_else(|| PLACEHOLDER.to_string(), |d| time_of_day(&d.sunrise)),
        sunset: today.map_or_else(|| PLACEHOLDER.to_string(), |d| time_of_day(&d.sunset)),
        wind: format!("{} км/ч", format_number(result.current.wind_speed_kmh)),
        humidity: PLACEHOLDER.to_string(),
        forecast,
    }
}

impl fmt::Display for WeatherView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f, "{}  {}", self.temperature, self.condition)?;
        writeln!(f, "Восход: {}  Закат: {}", self.sunrise, self.sunset)?;
        writeln!(f, "Ветер: {}  Влажность: {}", self.wind, self.humidity)?;

        for card in &self.forecast {
            writeln!(f)?;
            write!(f, "{}  {} {}  {}", card.date, card.icon, card.label, card.temperature)?;
        }

        Ok(())
    }
}

/// "2024-06-01T04:31" -> "04:31". Values without a `T` are returned whole.
fn time_of_day(iso: &str) -> String {
    iso.split_once('T').map_or(iso, |(_, time)| time).to_string()
}

/// Shortest decimal form: `20.0` prints as `20`, `20.5` as `20.5`.
fn format_number(value: f64) -> String {
    // avoid "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_string()
}

/// Rounds halves toward positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
