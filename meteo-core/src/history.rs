//! Recently searched cities and the last successful lookup.

use crate::store::KeyValueStore;

pub const HISTORY_KEY: &str = "searchHistory";
pub const LAST_CITY_KEY: &str = "last_city";
pub const MAX_HISTORY: usize = 5;

/// Most-recent-first list of unique city names, at most [`MAX_HISTORY`] long.
///
/// Every mutation is written through to the backing store immediately. Write
/// failures are logged and otherwise ignored; the in-memory list stays
/// authoritative for the rest of the session.
#[derive(Debug)]
pub struct SearchHistoryStore<S> {
    store: S,
    entries: Vec<String>,
}

impl<S: KeyValueStore> SearchHistoryStore<S> {
    pub fn new(store: S) -> Self {
        let mut history = Self { store, entries: Vec::new() };
        history.load();
        history
    }

    /// Re-reads the persisted history. Absent or malformed data yields an empty list.
    pub fn load(&mut self) -> Vec<String> {
        let raw = self.store.get(HISTORY_KEY);
        let parsed = match raw.as_deref().map(serde_json::from_str::<Vec<String>>) {
            Some(Ok(list)) => list,
            Some(Err(err)) => {
                tracing::warn!("Ignoring malformed search history: {err}");
                Vec::new()
            }
            None => Vec::new(),
        };

        let mut entries: Vec<String> = Vec::with_capacity(MAX_HISTORY);
        for city in parsed {
            if city.is_empty() || entries.contains(&city) {
                continue;
            }
            entries.push(city);
            if entries.len() == MAX_HISTORY {
                break;
            }
        }

        self.entries = entries;
        self.entries.clone()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Puts `city` at the front. Empty names and names already present are ignored.
    pub fn add(&mut self, city: &str) {
        if city.is_empty() || self.entries.iter().any(|c| c == city) {
            return;
        }

        self.entries.insert(0, city.to_string());
        self.entries.truncate(MAX_HISTORY);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(err) = self.store.remove(HISTORY_KEY) {
            tracing::warn!("Failed to clear persisted search history: {err:#}");
        }
    }

    pub fn last_city(&self) -> Option<String> {
        self.store.get(LAST_CITY_KEY).filter(|city| !city.is_empty())
    }

    pub fn set_last_city(&self, city: &str) {
        if let Err(err) = self.store.set(LAST_CITY_KEY, city) {
            tracing::warn!("Failed to persist last city: {err:#}");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.set(HISTORY_KEY, &json));

        if let Err(err) = result {
            tracing::warn!("Failed to persist search history: {err:#}");
        }
    }
}
