use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::corrector::{CityNameCorrector, DEFAULT_CITIES};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// default_city = "Bishkek"
/// language = "ru"
/// known_cities = ["Bishkek", "Osh"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City shown when nothing has been looked up yet.
    pub default_city: String,

    /// Language of place names returned by the geocoder.
    pub language: String,

    pub geocoding_url: String,
    pub forecast_url: String,

    /// Reference list for typo correction, in priority order.
    pub known_cities: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: "Bishkek".to_string(),
            language: "ru".to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            known_cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn corrector(&self) -> CityNameCorrector {
        CityNameCorrector::new(self.known_cities.iter().cloned())
    }

    pub fn set_default_city(&mut self, city: &str) -> Result<()> {
        let city = city.trim();
        if city.is_empty() {
            bail!("Default city must not be empty");
        }
        self.default_city = city.to_string();
        Ok(())
    }

    /// Accepts two-letter language codes such as "ru" or "en".
    pub fn set_language(&mut self, language: &str) -> Result<()> {
        let language = language.trim().to_lowercase();
        if language.len() != 2 || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            bail!("Unsupported language '{language}'. Expected a two-letter code such as 'ru'.");
        }
        self.language = language;
        Ok(())
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the persisted search history and last city.
    pub fn state_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().join("state.json"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "meteo", "meteo")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_open_meteo_in_russian() {
        let cfg = Config::default();

        assert_eq!(cfg.default_city, "Bishkek");
        assert_eq!(cfg.language, "ru");
        assert_eq!(cfg.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.known_cities.len(), DEFAULT_CITIES.len());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meteo").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_default_city("  Osh ").unwrap();
        cfg.set_language("EN").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_city, "Osh");
        assert_eq!(loaded.language, "en");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "known_cities = [\"Karakol\"]\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.known_cities, ["Karakol"]);
        assert_eq!(cfg.default_city, "Bishkek");
        assert_eq!(cfg.corrector().correct("karakl"), "Karakol");
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_city = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn rejects_bad_settings() {
        let mut cfg = Config::default();

        assert!(cfg.set_default_city("   ").is_err());
        assert!(cfg.set_language("russian").is_err());
        assert!(cfg.set_language("r1").is_err());
        assert_eq!(cfg, Config::default());
    }
}
