//! Application state: what the user currently sees, and which search owns it.

use parking_lot::Mutex;

use crate::{
    pipeline::WeatherPipeline,
    provider::WeatherApi,
    render::{WeatherView, render},
    store::KeyValueStore,
};

/// What a single search ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Rendered(WeatherView),
    /// User-facing error message.
    Failed(String),
    /// A newer search started before this one finished; nothing was shown or saved.
    Superseded,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub view: Option<WeatherView>,
    pub error: Option<String>,
    /// Ticket of the most recently started search.
    pub ticket: u64,
}

/// Owns the pipeline and the displayed state.
///
/// Every search takes a ticket when it starts. Only the holder of the newest
/// ticket may render or touch the history when it finishes, so overlapping
/// searches resolve to whichever the user started last.
#[derive(Debug)]
pub struct App<A, S> {
    pipeline: WeatherPipeline<A, S>,
    default_city: String,
    state: Mutex<AppState>,
}

impl<A: WeatherApi, S: KeyValueStore> App<A, S> {
    pub fn new(pipeline: WeatherPipeline<A, S>, default_city: impl Into<String>) -> Self {
        Self { pipeline, default_city: default_city.into(), state: Mutex::new(AppState::default()) }
    }

    pub fn pipeline(&self) -> &WeatherPipeline<A, S> {
        &self.pipeline
    }

    pub fn state(&self) -> AppState {
        self.state.lock().clone()
    }

    /// City to show on startup: the last successful lookup, else the configured default.
    pub fn initial_city(&self) -> String {
        self.pipeline.last_city().unwrap_or_else(|| self.default_city.clone())
    }

    pub async fn search(&self, raw_city: &str) -> SearchOutcome {
        let ticket = {
            let mut state = self.state.lock();
            state.ticket += 1;
            state.error = None;
            state.ticket
        };

        let fetched = self.pipeline.fetch(raw_city).await;

        let mut state = self.state.lock();
        if state.ticket != ticket {
            tracing::debug!(raw_city, ticket, latest = state.ticket, "discarding superseded search");
            return SearchOutcome::Superseded;
        }

        match fetched {
            Ok(lookup) => {
                self.pipeline.commit(&lookup);
                tracing::info!(city = %lookup.corrected, "weather lookup succeeded");

                let view = render(&lookup.result);
                state.view = Some(view.clone());
                SearchOutcome::Rendered(view)
            }
            Err(err) => {
                tracing::error!(raw_city, "weather lookup failed: {err}");

                let message = err.to_string();
                state.error = Some(message.clone());
                SearchOutcome::Failed(message)
            }
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.pipeline.history()
    }

    pub fn clear_history(&self) {
        self.pipeline.clear_history();
    }
}
