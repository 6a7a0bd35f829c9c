//! WMO weather condition codes mapped to display labels.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherLabel {
    pub text: &'static str,
    pub icon: &'static str,
}

impl WeatherLabel {
    const fn new(text: &'static str, icon: &'static str) -> Self {
        Self { text, icon }
    }
}

/// Label used for codes missing from [`WEATHER_CODES`].
pub const UNKNOWN: WeatherLabel = WeatherLabel::new("Unknown", "❓");

pub const WEATHER_CODES: &[(i32, WeatherLabel)] = &[
    (0, WeatherLabel::new("Ясно", "☀️")),
    (1, WeatherLabel::new("Преимущественно ясно", "🌤️")),
    (2, WeatherLabel::new("Переменная облачность", "⛅")),
    (3, WeatherLabel::new("Облачно", "☁️")),
    (45, WeatherLabel::new("Туман", "🌫️")),
    (48, WeatherLabel::new("Морозный туман", "🌫️")),
    (51, WeatherLabel::new("Морось", "🌦️")),
    (53, WeatherLabel::new("Морось", "🌦️")),
    (55, WeatherLabel::new("Морось", "🌧️")),
    (61, WeatherLabel::new("Дождь", "🌧️")),
    (63, WeatherLabel::new("Дождь", "🌧️")),
    (65, WeatherLabel::new("Сильный дождь", "🌧️")),
    (71, WeatherLabel::new("Снег", "❄️")),
    (73, WeatherLabel::new("Снег", "❄️")),
    (75, WeatherLabel::new("Сильный снег", "❄️")),
    (80, WeatherLabel::new("Ливень", "🌧️")),
    (81, WeatherLabel::new("Ливень", "🌧️")),
    (82, WeatherLabel::new("Сильный ливень", "🌧️")),
    (95, WeatherLabel::new("Гроза", "⛈️")),
    (96, WeatherLabel::new("Гроза с градом", "⛈️")),
    (99, WeatherLabel::new("Гроза с крупным градом", "⛈️")),
];

pub fn describe(code: i32) -> WeatherLabel {
    WEATHER_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_clear_sky() {
        let label = describe(0);
        assert_eq!(label.text, "Ясно");
        assert_eq!(label.icon, "☀️");
    }

    #[test]
    fn maps_precipitation_families() {
        assert_eq!(describe(65).text, "Сильный дождь");
        assert_eq!(describe(75).icon, "❄️");
        assert_eq!(describe(99).text, "Гроза с крупным градом");
    }

    #[test]
    fn unknown_codes_use_sentinel() {
        assert_eq!(describe(4), UNKNOWN);
        assert_eq!(describe(-1), UNKNOWN);
        assert_eq!(describe(999), WeatherLabel { text: "Unknown", icon: "❓" });
    }

    #[test]
    fn table_has_unique_codes() {
        let mut codes: Vec<i32> = WEATHER_CODES.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), WEATHER_CODES.len());
    }
}
