//! Typo correction for user-entered city names.

use crate::distance::distance;

/// Cities the corrector knows about out of the box.
pub const DEFAULT_CITIES: &[&str] = &[
    "Bishkek",
    "Moscow",
    "Saint Petersburg",
    "Osh",
    "Almaty",
    "Astana",
    "Tashkent",
    "New York",
    "London",
    "Paris",
    "Berlin",
    "Tokyo",
    "Seoul",
    "Dubai",
    "Madrid",
    "Rome",
    "Los Angeles",
    "Chicago",
];

/// Inputs shorter than this (after trimming) are never corrected.
pub const MIN_INPUT_LEN: usize = 3;

/// Largest edit distance that still counts as a typo of a known city.
pub const MAX_DISTANCE: usize = 2;

/// Maps a raw city name to the closest known city when it looks like a typo.
#[derive(Debug, Clone)]
pub struct CityNameCorrector {
    cities: Vec<String>,
}

impl Default for CityNameCorrector {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES.iter().map(|c| c.to_string()))
    }
}

impl CityNameCorrector {
    pub fn new(cities: impl IntoIterator<Item = String>) -> Self {
        Self { cities: cities.into_iter().collect() }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Returns the canonical spelling of the nearest known city if it is within
    /// [`MAX_DISTANCE`] edits, otherwise `raw` unchanged.
    ///
    /// Ties go to whichever city comes first in the list.
    pub fn correct(&self, raw: &str) -> String {
        let clean = raw.trim().to_lowercase();
        if clean.chars().count() < MIN_INPUT_LEN {
            return raw.to_string();
        }

        let mut best: Option<(&str, usize)> = None;
        for city in &self.cities {
            let score = distance(&clean, &city.to_lowercase());
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((city.as_str(), score));
            }
        }

        match best {
            Some((city, score)) if score <= MAX_DISTANCE => {
                if city != raw {
                    tracing::debug!(raw, corrected = city, score, "corrected city name");
                }
                city.to_string()
            }
            _ => raw.to_string(),
        }
    }
}
