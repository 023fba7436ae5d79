//! Scripted category source shared by the store tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::api::{ApiError, CategorySource};
use crate::cache::{CategoryCache, MemoryStore, CATEGORIES_CACHE_KEY};
use crate::models::Category;
use crate::store::{CategoriesState, CategoryStore, RetryPolicy};

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub timeout: Duration,
    pub at: Instant,
    /// Published state at the moment the request went out.
    pub state: Option<CategoriesState>,
}

/// Replays a fixed list of outcomes, one per fetch, and records every call.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Category>, ApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    observer: Mutex<Option<watch::Receiver<CategoriesState>>>,
    latency: Option<Duration>,
}

impl ScriptedSource {
    pub fn new(responses: impl IntoIterator<Item = Result<Vec<Category>, ApiError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Make every fetch take `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn observe(&self, rx: watch::Receiver<CategoriesState>) {
        *self.observer.lock().expect("observer lock") = Some(rx);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn timeouts(&self) -> Vec<Duration> {
        self.calls().iter().map(|c| c.timeout).collect()
    }
}

#[async_trait]
impl CategorySource for ScriptedSource {
    async fn fetch_categories(&self, timeout: Duration) -> Result<Vec<Category>, ApiError> {
        let state = self
            .observer
            .lock()
            .expect("observer lock")
            .as_ref()
            .map(|rx| rx.borrow().clone());
        self.calls.lock().expect("calls lock").push(RecordedCall {
            timeout,
            at: Instant::now(),
            state,
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let next = self.responses.lock().expect("responses lock").pop_front();
        next.unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }
}

pub(crate) fn categories(names: &[&str]) -> Vec<Category> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Category::new(json!({ "_id": format!("c{}", i), "nombre": name })))
        .collect()
}

pub(crate) fn timeout_error(ms: u64) -> ApiError {
    ApiError::Timeout(Duration::from_millis(ms))
}

pub(crate) fn server_error(message: Option<&str>) -> ApiError {
    ApiError::Server {
        status: 500,
        message: message.map(str::to_string),
    }
}

/// Build a store over `source` with an in-memory cache, optionally seeded
/// with a raw cache entry. The source observes the store's state.
pub(crate) fn store_over(
    source: &Arc<ScriptedSource>,
    cached: Option<&str>,
) -> (CategoryStore, CategoryCache) {
    let storage = match cached {
        Some(raw) => MemoryStore::with_entry(CATEGORIES_CACHE_KEY, raw),
        None => MemoryStore::new(),
    };
    let cache = CategoryCache::new(Arc::new(storage));
    let store = CategoryStore::new(source.clone(), cache.clone(), RetryPolicy::default());
    source.observe(store.subscribe());
    (store, cache)
}
