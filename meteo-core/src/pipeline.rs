//! The lookup chain: correct the name, geocode it, fetch the forecast, then
//! record the city in the history.

use chrono::Utc;
use parking_lot::Mutex;

use crate::{
    corrector::CityNameCorrector,
    error::LookupError,
    history::SearchHistoryStore,
    model::{City, Forecast, WeatherResult},
    provider::WeatherApi,
    store::KeyValueStore,
};

/// A finished fetch that has not yet been recorded in the history.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    /// The name that was actually queried, after typo correction.
    pub corrected: String,
    pub result: WeatherResult,
}

#[derive(Debug)]
pub struct WeatherPipeline<A, S> {
    api: A,
    corrector: CityNameCorrector,
    history: Mutex<SearchHistoryStore<S>>,
}

impl<A: WeatherApi, S: KeyValueStore> WeatherPipeline<A, S> {
    pub fn new(api: A, corrector: CityNameCorrector, history: SearchHistoryStore<S>) -> Self {
        Self { api, corrector, history: Mutex::new(history) }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn corrector(&self) -> &CityNameCorrector {
        &self.corrector
    }

    /// First geocoding match for `name`.
    pub async fn geocode(&self, name: &str) -> Result<City, LookupError> {
        self.api
            .geocode(name)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::CityNotFound(name.to_string()))
    }

    pub async fn forecast(&self, city: &City) -> Result<Forecast, LookupError> {
        self.api.forecast(city.latitude, city.longitude).await
    }

    /// Runs both network stages without touching the history.
    pub async fn fetch(&self, raw_city: &str) -> Result<Lookup, LookupError> {
        let corrected = self.corrector.correct(raw_city);

        let city = self.geocode(&corrected).await?;
        tracing::debug!(
            query = %corrected,
            name = %city.name,
            country = %city.country,
            "geocoded"
        );

        let forecast = self.forecast(&city).await?;
        let result = WeatherResult::new(city, forecast, Utc::now());

        Ok(Lookup { corrected, result })
    }

    /// Records a successful lookup: history entry plus last city.
    pub fn commit(&self, lookup: &Lookup) {
        let mut history = self.history.lock();
        history.add(&lookup.corrected);
        history.set_last_city(&lookup.corrected);
    }

    /// Fetch and, on success, commit.
    pub async fn lookup(&self, raw_city: &str) -> Result<WeatherResult, LookupError> {
        let lookup = self.fetch(raw_city).await?;
        self.commit(&lookup);
        tracing::info!(city = %lookup.corrected, "weather lookup succeeded");
        Ok(lookup.result)
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().entries().to_vec()
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    pub fn last_city(&self) -> Option<String> {
        self.history.lock().last_city()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        history::{HISTORY_KEY, LAST_CITY_KEY},
        model::{CurrentWeather, DailyForecastEntry},
        store::MemoryStore,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct FakeApi {
        queries: Mutex<Vec<String>>,
        fail_forecast: bool,
    }

    #[async_trait]
    impl WeatherApi for FakeApi {
        async fn geocode(&self, name: &str) -> Result<Vec<City>, LookupError> {
            self.queries.lock().push(name.to_string());
            if name != "Bishkek" {
                return Ok(Vec::new());
            }
            Ok(vec![City {
                name: "Бишкек".into(),
                country: "Киргизия".into(),
                latitude: 42.87,
                longitude: 74.59,
            }])
        }

        async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, LookupError> {
            if self.fail_forecast {
                return Err(LookupError::Network("connection reset".into()));
            }
            assert_eq!((latitude, longitude), (42.87, 74.59));
            Ok(Forecast {
                current: CurrentWeather {
                    temperature_c: 18.0,
                    wind_speed_kmh: 5.4,
                    condition_code: 0,
                },
                daily: vec![DailyForecastEntry {
                    date: "2024-06-01".into(),
                    condition_code: 0,
                    min_temp_c: 10.0,
                    max_temp_c: 25.0,
                    sunrise: "2024-06-01T04:31".into(),
                    sunset: "2024-06-01T19:35".into(),
                }],
            })
        }
    }

    fn pipeline(api: FakeApi) -> (WeatherPipeline<FakeApi, Arc<MemoryStore>>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let history = SearchHistoryStore::new(Arc::clone(&store));
        (WeatherPipeline::new(api, CityNameCorrector::default(), history), store)
    }

    #[tokio::test]
    async fn lookup_corrects_name_before_geocoding() {
        let (pipeline, store) = pipeline(FakeApi::default());

        let result = pipeline.lookup("bishkk").await.unwrap();

        assert_eq!(result.city.name, "Бишкек");
        assert_eq!(result.current.condition_code, 0);
        assert_eq!(result.daily.len(), 1);
        assert_eq!(*pipeline.api.queries.lock(), ["Bishkek"]);
        assert_eq!(pipeline.history(), ["Bishkek"]);
        assert_eq!(store.get(LAST_CITY_KEY).as_deref(), Some("Bishkek"));
    }

    #[tokio::test]
    async fn unknown_city_is_not_found_and_leaves_state_alone() {
        let (pipeline, store) = pipeline(FakeApi::default());

        let err = pipeline.lookup("UnknownPlace123").await.unwrap_err();

        assert_eq!(err, LookupError::CityNotFound("UnknownPlace123".into()));
        assert!(pipeline.history().is_empty());
        assert_eq!(store.get(HISTORY_KEY), None);
        assert_eq!(store.get(LAST_CITY_KEY), None);
    }

    #[tokio::test]
    async fn forecast_failure_aborts_without_mutation() {
        let (pipeline, store) = pipeline(FakeApi { fail_forecast: true, ..Default::default() });

        let err = pipeline.lookup("Bishkek").await.unwrap_err();

        assert_eq!(err.to_string(), "Network error: connection reset");
        assert!(pipeline.history().is_empty());
        assert_eq!(store.get(LAST_CITY_KEY), None);
    }

    #[tokio::test]
    async fn fetch_does_not_commit() {
        let (pipeline, _store) = pipeline(FakeApi::default());

        let lookup = pipeline.fetch("Bishkek").await.unwrap();
        assert_eq!(lookup.corrected, "Bishkek");
        assert!(pipeline.history().is_empty());
        assert_eq!(pipeline.last_city(), None);

        pipeline.commit(&lookup);
        assert_eq!(pipeline.history(), ["Bishkek"]);
        assert_eq!(pipeline.last_city().as_deref(), Some("Bishkek"));
    }

    #[tokio::test]
    async fn clear_history_keeps_last_city() {
        let (pipeline, _store) = pipeline(FakeApi::default());
        pipeline.lookup("Bishkek").await.unwrap();

        pipeline.clear_history();

        assert!(pipeline.history().is_empty());
        assert_eq!(pipeline.last_city().as_deref(), Some("Bishkek"));
    }
}
